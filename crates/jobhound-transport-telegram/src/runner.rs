use crate::bot;
use crate::bot::handlers::{get_user_id_safe, is_search_text, ChatSearchService, Command};
use crate::config::BotSettings;
use jobhound_core::scraper::JobSpyApiScraper;
use jobhound_runtime::{ScrapeRunner, SearchService, SessionStore};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{error, info};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let service = init_search_service(&settings);

    let bot = Bot::new(settings.telegram.token());
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_search_service(settings: &BotSettings) -> Arc<ChatSearchService> {
    let scraper = Arc::new(JobSpyApiScraper::new(settings.search.as_ref()));
    info!(
        api_url = %settings.search.jobspy_api_url,
        sources = ?settings.search.sources(),
        "JobSpy scraper initialized."
    );

    let runner = ScrapeRunner::new(scraper, settings.scrape_timeout());
    let sessions = Arc::new(SessionStore::new(
        settings.session_ttl(),
        settings.search.session_max_capacity,
    ));

    info!(
        "Initializing SessionStore (ttl: {}s, max_size: {}, scrape_timeout: {}s)",
        settings.search.session_ttl_secs,
        settings.search.session_max_capacity,
        settings.search.scrape_timeout_secs
    );

    Arc::new(SearchService::new(
        runner,
        sessions,
        Arc::clone(&settings.search),
    ))
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_nav_callback))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.text().is_some_and(is_search_text))
                        .endpoint(handle_search_text),
                ),
        )
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start => bot::handlers::start(bot, msg).await,
        Command::Help => bot::handlers::help(bot, msg).await,
        Command::Healthcheck => bot::handlers::healthcheck(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_search_text(
    bot: Bot,
    msg: Message,
    service: Arc<ChatSearchService>,
) -> Result<(), teloxide::RequestError> {
    let user_id = get_user_id_safe(&msg);
    if let Err(e) = bot::handlers::handle_text(bot, msg, service).await {
        error!("Text handler error for user {}: {}", user_id, e);
    }
    respond(())
}

async fn handle_nav_callback(
    bot: Bot,
    q: CallbackQuery,
    service: Arc<ChatSearchService>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_callback(bot, q, service).await {
        error!("Navigation callback handler error: {}", e);
    }
    respond(())
}
