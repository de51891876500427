//! Errors surfaced by startup and by the network event handler.

pub use crate::config::ConfigError;
pub use crate::state::StateError;
pub use crate::store::StoreError;

/// Union of the module errors that reach the application edge.
///
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store calls made by the network handler
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// State transitions refused while handling a network reply
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}
