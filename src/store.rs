//! Channel store - fixed table of single-message slots
//!
//! Each channel owns a fixed-capacity buffer and the length of the message
//! currently held in it. Every channel sits behind its own lock, so a reader
//! always sees bytes and length from the same write.

use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use parking_lot::RwLock;

/// Index of a channel in the store
pub type ChannelId = usize;

/// One channel's message buffer
struct Slot {
    /// Fixed-capacity buffer, `max_message_len` bytes
    buf: Box<[u8]>,
    /// Valid prefix of `buf`
    len: usize,
    /// Number of writes accepted so far
    generation: u64,
}

impl Slot {
    fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
            generation: 0,
        }
    }

    #[inline]
    fn message(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Copy of a channel's message at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSnapshot {
    /// Message bytes
    pub bytes: Vec<u8>,
    /// How many writes the channel had accepted when the snapshot was taken
    pub generation: u64,
}

impl MessageSnapshot {
    /// Message length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fixed-size table of channels
pub struct ChannelStore {
    slots: Box<[RwLock<Slot>]>,
    max_message_len: usize,
}

impl ChannelStore {
    /// Allocate `config.channel_count` empty channels
    pub fn new(config: &ChannelConfig) -> Result<Self> {
        config.validate()?;

        let slots = (0..config.channel_count)
            .map(|_| RwLock::new(Slot::new(config.max_message_len)))
            .collect();

        log::debug!(
            "channel store initialized: {} channels, {} bytes max",
            config.channel_count,
            config.max_message_len
        );

        Ok(Self {
            slots,
            max_message_len: config.max_message_len,
        })
    }

    /// Number of channels in the table
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.slots.len()
    }

    /// Largest message a channel can hold
    #[inline]
    pub fn max_message_len(&self) -> usize {
        self.max_message_len
    }

    /// Fail with `InvalidChannel` unless `channel` is in range
    pub fn check_channel(&self, channel: ChannelId) -> Result<()> {
        self.slot(channel).map(|_| ())
    }

    fn slot(&self, channel: ChannelId) -> Result<&RwLock<Slot>> {
        self.slots.get(channel).ok_or(ChannelError::InvalidChannel {
            channel,
            count: self.slots.len(),
        })
    }

    /// Snapshot the current message of `channel`
    pub fn get_message(&self, channel: ChannelId) -> Result<MessageSnapshot> {
        let slot = self.slot(channel)?.read();
        Ok(MessageSnapshot {
            bytes: slot.message().to_vec(),
            generation: slot.generation,
        })
    }

    /// Run `f` over the current message of `channel` with the channel locked
    pub fn with_message<R>(&self, channel: ChannelId, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
        let slot = self.slot(channel)?.read();
        Ok(f(slot.message()))
    }

    /// Replace the message of `channel`
    ///
    /// Input beyond `max_message_len` is dropped. Returns the number of bytes
    /// accepted.
    pub fn set_message(&self, channel: ChannelId, data: &[u8]) -> Result<usize> {
        let mut slot = self.slot(channel)?.write();

        let len = data.len().min(self.max_message_len);
        slot.buf[..len].copy_from_slice(&data[..len]);
        slot.len = len;
        slot.generation += 1;

        if len < data.len() {
            log::trace!(
                "channel {}: truncated {}-byte write to {} bytes",
                channel,
                data.len(),
                len
            );
        }

        Ok(len)
    }
}
