//! Error types for method-call dispatch.

use thiserror::Error;

/// Negative answers a method call can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The method name is not handled by this channel
    #[error("Method not implemented: {method}")]
    NotImplemented { method: String },

    /// The method exists but its arguments were unusable
    #[error("Invalid argument for {method}: {message}")]
    InvalidArgument { method: String, message: String },
}

impl ChannelError {
    /// Short machine-readable code, mirroring the host's method-channel errors.
    pub fn code(&self) -> &'static str {
        match self {
            ChannelError::NotImplemented { .. } => "not_implemented",
            ChannelError::InvalidArgument { .. } => "invalid_argument",
        }
    }
}
