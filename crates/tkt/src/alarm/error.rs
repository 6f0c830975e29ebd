//! Error types for platform access.

use thiserror::Error;

/// Errors that can occur while talking to the device platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The application id cannot be turned into a `package:` URI
    #[error("Invalid package name {package:?}: {message}")]
    InvalidPackage { package: String, message: String },

    /// A platform command could not be run or exited unsuccessfully
    #[error("Command `{program}` failed: {message}")]
    Command { program: String, message: String },

    /// The platform answered with something we could not interpret
    #[error("Unexpected platform output: {message}")]
    UnexpectedOutput { message: String },
}
