use crate::bot::views::{DefaultSearchView, SearchView};
use crate::bot::TelegramSearchTransport;
use anyhow::Result;
use jobhound_runtime::{NavigationOutcome, SearchOutcome, SearchService};
use std::sync::Arc;
use teloxide::{prelude::*, types::CallbackQuery, utils::command::BotCommands};
use tracing::{debug, info, warn};

/// Conversation key of the search service: the Telegram chat id.
pub type ChatSearchService = SearchService<i64>;

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Whether a text message should be treated as a search query.
///
/// Anything that looks like a command is left to the command branch.
///
/// # Examples
///
/// ```
/// use jobhound_transport_telegram::bot::handlers::is_search_text;
/// assert!(is_search_text("legal counsel, Berlin"));
/// assert!(!is_search_text("/stats"));
/// ```
#[must_use]
pub fn is_search_text(text: &str) -> bool {
    !text.trim_start().starts_with('/')
}

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Show the welcome message
    #[command(description = "Start the bot.")]
    Start,
    /// Show the query format
    #[command(description = "Show how to search.")]
    Help,
    /// Check bot health
    #[command(description = "Check bot health.")]
    Healthcheck,
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the welcome message cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    info!("User {user_id} initiated /start command.");
    bot.send_message(msg.chat.id, DefaultSearchView::welcome_message())
        .await?;
    Ok(())
}

/// Help handler
///
/// # Errors
///
/// Returns an error if the usage message cannot be sent.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, DefaultSearchView::help_message())
        .await?;
    Ok(())
}

/// Healthcheck handler
///
/// # Errors
///
/// Returns an error if the healthcheck response cannot be sent.
pub async fn healthcheck(bot: Bot, msg: Message) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    info!("Healthcheck command received from user {user_id}.");
    bot.send_message(msg.chat.id, "OK").await?;
    info!("Responded 'OK' to healthcheck from user {user_id}.");
    Ok(())
}

/// Run a search for a text message.
///
/// # Errors
///
/// Never; failures are reported to the user by the service.
pub async fn handle_text(bot: Bot, msg: Message, service: Arc<ChatSearchService>) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    debug!(
        chat_id = %chat_id,
        user_id = get_user_id_safe(&msg),
        "Search query received"
    );

    let transport = TelegramSearchTransport::for_chat(bot, chat_id);
    match service.handle_query(&transport, chat_id.0, text).await {
        SearchOutcome::Failed(error) => {
            warn!(chat_id = %chat_id, error = %error, "Search ended with an error reply");
        }
        outcome => debug!(chat_id = %chat_id, ?outcome, "Search handled"),
    }
    Ok(())
}

/// Handle a navigation button click.
///
/// # Errors
///
/// Returns an error if a click without a message cannot be acknowledged.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    service: Arc<ChatSearchService>,
) -> Result<()> {
    let Some(message) = q.message.as_ref() else {
        // Inline-mode clicks carry no message to re-render
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;
    let payload = q.data.as_deref().unwrap_or_default();

    let transport =
        TelegramSearchTransport::for_callback(bot, chat_id, message.id(), q.id.clone());
    match service
        .handle_navigation(&transport, &chat_id.0, payload)
        .await
    {
        NavigationOutcome::Failed(error) => {
            warn!(chat_id = %chat_id, payload, error = %error, "Navigation failed");
        }
        outcome => debug!(chat_id = %chat_id, payload, ?outcome, "Navigation handled"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_parse() {
        assert_eq!(Command::parse("/start", "jobhound_bot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/help", "jobhound_bot").ok(), Some(Command::Help));
        assert_eq!(
            Command::parse("/healthcheck@jobhound_bot", "jobhound_bot").ok(),
            Some(Command::Healthcheck)
        );
        assert!(Command::parse("/stats", "jobhound_bot").is_err());
    }

    #[test]
    fn test_queries_are_not_commands() {
        assert!(is_search_text("legal counsel, Berlin"));
        assert!(is_search_text("no comma here"));
        assert!(!is_search_text("/start"));
        assert!(!is_search_text("  /unknown"));
    }
}
