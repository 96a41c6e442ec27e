//! Channel table configuration

use crate::error::{ChannelError, Result};

/// Default number of channels (one per minor device)
pub const DEFAULT_CHANNEL_COUNT: usize = 5;

/// Default maximum message length in bytes
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 255;

/// Channel configuration
///
/// Fixed once a [`ChannelStore`](crate::ChannelStore) is built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Number of independently addressable channels
    pub channel_count: usize,
    /// Maximum bytes a single message may hold; longer writes are truncated
    pub max_message_len: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            channel_count: DEFAULT_CHANNEL_COUNT,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl ChannelConfig {
    /// Check that both limits are non-zero
    pub fn validate(&self) -> Result<()> {
        if self.channel_count == 0 {
            return Err(ChannelError::Configuration {
                reason: "channel count must be at least 1".to_string(),
            });
        }
        if self.max_message_len == 0 {
            return Err(ChannelError::Configuration {
                reason: "maximum message length must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
