use anyhow::Result;
use async_trait::async_trait;
use jobhound_core::export::ExportFile;
use jobhound_core::pagination::PageView;
use jobhound_core::search::SearchRequest;

/// Opaque reference to a message previously sent through a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub i32);

/// Transport adapter used by the search and navigation flows.
///
/// An instance is bound to one conversation and, for button clicks, to the
/// clicked message and its callback.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Send the "searching..." notice for a request.
    async fn send_processing(&self, request: &SearchRequest) -> Result<MessageHandle>;

    /// Replace the text of a processing notice with the "no results" message.
    async fn show_no_results(&self, notice: MessageHandle) -> Result<()>;

    /// Delete a previously sent message.
    async fn delete_message(&self, message: MessageHandle) -> Result<()>;

    /// Send a user-facing error reply.
    async fn send_error(&self, error: &str) -> Result<()>;

    /// Render a page as a fresh message.
    async fn show_page(&self, view: &PageView<'_>) -> Result<MessageHandle>;

    /// Re-render the clicked message in place.
    async fn update_page(&self, view: &PageView<'_>) -> Result<()>;

    /// Send the CSV export as a file attachment.
    async fn send_export(&self, file: &ExportFile) -> Result<()>;

    /// Acknowledge the button click being handled. No-op for plain messages.
    async fn acknowledge(&self) -> Result<()> {
        Ok(())
    }
}
