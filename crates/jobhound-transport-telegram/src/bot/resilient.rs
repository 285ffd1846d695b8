//! Resilient messaging utilities with automatic retry for Telegram API operations.
//!
//! These wrappers retry transient network failures using exponential backoff
//! with jitter and treat the harmless "not modified" / "not found" replies
//! as success.

use anyhow::Result;
use jobhound_core::utils::retry_transport_operation;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, InputFile, Message, MessageId, ParseMode};
use tracing::debug;

const ERROR_NOT_MODIFIED: &str = "message is not modified";
const ERROR_NOT_FOUND: &str = "message to delete not found";

/// Send a message with automatic retry on network failures.
///
/// # Errors
///
/// Returns the last error after all retries are exhausted.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    parse_mode: Option<ParseMode>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<Message> {
    let text = text.into();
    retry_transport_operation(|| async {
        let mut req = bot.send_message(chat_id, text.clone());
        if let Some(pm) = parse_mode {
            req = req.parse_mode(pm);
        }
        if let Some(markup) = keyboard.clone() {
            req = req.reply_markup(markup);
        }
        req.await
            .map_err(|e| anyhow::anyhow!("Telegram send error: {e}"))
    })
    .await
}

/// Edit a message's text (and keyboard) with automatic retry.
///
/// Returns `Ok(false)` when Telegram reports the content is unchanged.
///
/// # Errors
///
/// Returns the last error after all retries are exhausted.
pub async fn edit_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    msg_id: MessageId,
    text: impl Into<String>,
    parse_mode: Option<ParseMode>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<bool> {
    let text = text.into();
    retry_transport_operation(|| async {
        let mut req = bot.edit_message_text(chat_id, msg_id, text.clone());
        if let Some(pm) = parse_mode {
            req = req.parse_mode(pm);
        }
        if let Some(markup) = keyboard.clone() {
            req = req.reply_markup(markup);
        }
        match req.await {
            Ok(_) => Ok(true),
            Err(e) if e.to_string().contains(ERROR_NOT_MODIFIED) => {
                debug!("Message update skipped: message is not modified");
                Ok(false)
            }
            Err(e) => Err(anyhow::anyhow!("Telegram edit error: {e}")),
        }
    })
    .await
}

/// Delete a message with automatic retry. A message that is already gone
/// counts as deleted.
///
/// # Errors
///
/// Returns the last error after all retries are exhausted.
pub async fn delete_message_resilient(bot: &Bot, chat_id: ChatId, msg_id: MessageId) -> Result<()> {
    retry_transport_operation(|| async {
        match bot.delete_message(chat_id, msg_id).await {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains(ERROR_NOT_FOUND) => {
                debug!("Message deletion skipped: {e}");
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("Telegram delete error: {e}")),
        }
    })
    .await
}

/// Send an in-memory document with automatic retry.
///
/// # Errors
///
/// Returns the last error after all retries are exhausted.
pub async fn send_document_resilient(
    bot: &Bot,
    chat_id: ChatId,
    file_name: &str,
    content: &[u8],
    caption: &str,
) -> Result<Message> {
    retry_transport_operation(|| async {
        let file = InputFile::memory(content.to_vec()).file_name(file_name.to_string());
        bot.send_document(chat_id, file)
            .caption(caption)
            .await
            .map_err(|e| anyhow::anyhow!("Telegram document error: {e}"))
    })
    .await
}
