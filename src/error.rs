//! Error types for chardev_channels

use crate::cursor::HandleId;
use crate::store::ChannelId;
use std::io;
use thiserror::Error;

/// Result type for channel operations
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Errors that can occur in channel operations
///
/// Empty messages, zero-length reads and zero-length writes are not errors;
/// they succeed with a count of 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Invalid channel count or message length at initialization
    #[error("Invalid channel configuration: {reason}")]
    Configuration { reason: String },

    /// Channel selector out of range
    #[error("Invalid channel {channel}: only {count} channels configured")]
    InvalidChannel { channel: ChannelId, count: usize },

    /// Unknown, already closed, or foreign handle
    #[error("Invalid handle: {0}")]
    InvalidHandle(HandleId),
}

impl From<ChannelError> for io::Error {
    fn from(err: ChannelError) -> Self {
        let kind = match err {
            ChannelError::Configuration { .. } => io::ErrorKind::InvalidInput,
            ChannelError::InvalidChannel { .. } => io::ErrorKind::NotFound,
            ChannelError::InvalidHandle(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}
