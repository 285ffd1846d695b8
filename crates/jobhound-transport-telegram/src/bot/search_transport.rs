use crate::bot::resilient::{
    delete_message_resilient, edit_message_resilient, send_document_resilient,
    send_message_resilient,
};
use crate::bot::views::{page_keyboard, render_page_html, DefaultSearchView, SearchView};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use jobhound_core::export::ExportFile;
use jobhound_core::pagination::PageView;
use jobhound_core::search::SearchRequest;
use jobhound_runtime::{MessageHandle, SearchTransport};
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, ChatId, MessageId, ParseMode};
use tracing::debug;

/// The message a button click came from.
#[derive(Debug, Clone)]
struct ClickedMessage {
    query_id: CallbackQueryId,
    message_id: MessageId,
}

/// Telegram-specific search transport, bound to one chat.
pub struct TelegramSearchTransport {
    bot: Bot,
    chat_id: ChatId,
    clicked: Option<ClickedMessage>,
}

impl TelegramSearchTransport {
    /// Transport for a plain text message in `chat_id`.
    #[must_use]
    pub const fn for_chat(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            clicked: None,
        }
    }

    /// Transport for a button click on `message_id`.
    #[must_use]
    pub const fn for_callback(
        bot: Bot,
        chat_id: ChatId,
        message_id: MessageId,
        query_id: CallbackQueryId,
    ) -> Self {
        Self {
            bot,
            chat_id,
            clicked: Some(ClickedMessage {
                query_id,
                message_id,
            }),
        }
    }
}

#[async_trait]
impl SearchTransport for TelegramSearchTransport {
    async fn send_processing(&self, request: &SearchRequest) -> Result<MessageHandle> {
        let text = DefaultSearchView::processing_message(request);
        let msg = send_message_resilient(&self.bot, self.chat_id, text, None, None).await?;
        Ok(MessageHandle(msg.id.0))
    }

    async fn show_no_results(&self, notice: MessageHandle) -> Result<()> {
        edit_message_resilient(
            &self.bot,
            self.chat_id,
            MessageId(notice.0),
            DefaultSearchView::no_results_message(),
            None,
            None,
        )
        .await
        .map(|_| ())
    }

    async fn delete_message(&self, message: MessageHandle) -> Result<()> {
        delete_message_resilient(&self.bot, self.chat_id, MessageId(message.0)).await
    }

    async fn send_error(&self, error: &str) -> Result<()> {
        let text = DefaultSearchView::error_message(error);
        send_message_resilient(&self.bot, self.chat_id, text, None, None)
            .await
            .map(|_| ())
    }

    async fn show_page(&self, view: &PageView<'_>) -> Result<MessageHandle> {
        let msg = send_message_resilient(
            &self.bot,
            self.chat_id,
            render_page_html(view),
            Some(ParseMode::Html),
            page_keyboard(view),
        )
        .await?;
        Ok(MessageHandle(msg.id.0))
    }

    async fn update_page(&self, view: &PageView<'_>) -> Result<()> {
        let clicked = self
            .clicked
            .as_ref()
            .ok_or_else(|| anyhow!("No clicked message to re-render"))?;

        let changed = edit_message_resilient(
            &self.bot,
            self.chat_id,
            clicked.message_id,
            render_page_html(view),
            Some(ParseMode::Html),
            page_keyboard(view),
        )
        .await?;
        if !changed {
            debug!(chat_id = %self.chat_id, page = view.page, "Page already displayed");
        }
        Ok(())
    }

    async fn send_export(&self, file: &ExportFile) -> Result<()> {
        send_document_resilient(
            &self.bot,
            self.chat_id,
            &file.file_name,
            &file.content,
            DefaultSearchView::export_caption(),
        )
        .await
        .map(|_| ())
    }

    async fn acknowledge(&self) -> Result<()> {
        let Some(clicked) = &self.clicked else {
            return Ok(());
        };
        self.bot
            .answer_callback_query(clicked.query_id.clone())
            .await
            .map(|_| ())
            .map_err(|e| anyhow!("Telegram callback answer error: {e}"))
    }
}
