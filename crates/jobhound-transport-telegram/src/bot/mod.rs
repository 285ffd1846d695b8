/// Command, text and callback handlers
pub mod handlers;
/// Resilient messaging with automatic retry for Telegram API operations
pub mod resilient;
/// Telegram implementation of the search transport
pub mod search_transport;
/// View layer for UI components (keyboards, messages)
pub mod views;

pub use search_transport::TelegramSearchTransport;
