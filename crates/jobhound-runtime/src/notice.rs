//! Scoped handle for the "searching..." message.
//!
//! Every search that gets past parsing opens exactly one notice and must
//! settle it: replaced with the "no results" text, or deleted. Dropping an
//! unsettled notice leaves the message in the chat and logs a warning.

use crate::transport::{MessageHandle, SearchTransport};
use anyhow::Result;
use jobhound_core::search::SearchRequest;
use tracing::warn;

/// A sent processing notice that still has to be settled.
#[must_use = "a processing notice must be settled with `dismiss` or `replace_with_no_results`"]
pub struct ProcessingNotice<'t, T: SearchTransport + ?Sized> {
    transport: &'t T,
    handle: MessageHandle,
    settled: bool,
}

impl<'t, T: SearchTransport + ?Sized> ProcessingNotice<'t, T> {
    /// Send the notice for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot send the message.
    pub async fn open(transport: &'t T, request: &SearchRequest) -> Result<Self> {
        let handle = transport.send_processing(request).await?;
        Ok(Self {
            transport,
            handle,
            settled: false,
        })
    }

    /// The underlying message.
    #[must_use]
    pub const fn handle(&self) -> MessageHandle {
        self.handle
    }

    /// Turn the notice into the "no results" message.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit fails; the notice counts as settled anyway.
    pub async fn replace_with_no_results(mut self) -> Result<()> {
        self.settled = true;
        self.transport.show_no_results(self.handle).await
    }

    /// Delete the notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails; the notice counts as settled anyway.
    pub async fn dismiss(mut self) -> Result<()> {
        self.settled = true;
        self.transport.delete_message(self.handle).await
    }
}

impl<T: SearchTransport + ?Sized> Drop for ProcessingNotice<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(message = ?self.handle, "Processing notice dropped without cleanup");
        }
    }
}
