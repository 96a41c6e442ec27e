//! Channel access - the open/read/write/close operations layer
//!
//! Binds handles to channels of a shared [`ChannelStore`] and runs the read
//! protocol against each handle's cursor.

use crate::config::ChannelConfig;
use crate::cursor::{HandleId, HandleTable, ReadCursor};
use crate::error::Result;
use crate::session::Session;
use crate::store::{ChannelId, ChannelStore};
use std::sync::Arc;

/// Operations layer over a channel store
pub struct ChannelAccess {
    store: Arc<ChannelStore>,
    handles: HandleTable,
}

impl ChannelAccess {
    /// Serve handles over an existing store
    pub fn new(store: Arc<ChannelStore>) -> Self {
        Self {
            store,
            handles: HandleTable::new(),
        }
    }

    /// Build a fresh store from `config` and serve it
    pub fn with_config(config: &ChannelConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ChannelStore::new(config)?)))
    }

    /// The underlying store
    #[inline]
    pub fn store(&self) -> &Arc<ChannelStore> {
        &self.store
    }

    /// Open a handle on `channel` with its cursor at 0
    pub fn open(&self, channel: ChannelId) -> Result<HandleId> {
        self.store.check_channel(channel)?;
        let handle = self.handles.insert(channel);
        log::debug!("open: channel {} -> handle {}", channel, handle);
        Ok(handle)
    }

    /// Read up to `buf.len()` bytes from the handle's channel
    ///
    /// Returns the number of bytes delivered. 0 is a normal result for an
    /// empty message, an empty buffer, or a starved cursor.
    pub fn read(&self, handle: HandleId, buf: &mut [u8]) -> Result<usize> {
        let entry = self.handles.get(handle)?;
        let mut cursor = entry.lock();
        let start = cursor.offset();

        let (outcome, len) = self
            .store
            .with_message(cursor.channel(), |msg| (cursor.deliver(msg, buf), msg.len()))?;

        if outcome.starved {
            log::warn!(
                "handle {}: cursor {} is past the {}-byte message on channel {}; \
                 reads stay empty until a longer write",
                handle,
                start,
                len,
                cursor.channel()
            );
        }
        log::trace!(
            "read: handle {} channel {} from {} of {}: {} bytes{}",
            handle,
            cursor.channel(),
            start,
            len,
            outcome.delivered,
            if outcome.reset { ", cursor reset" } else { "" }
        );

        Ok(outcome.delivered)
    }

    /// Read up to `count` bytes into a new buffer
    pub fn read_to_vec(&self, handle: HandleId, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        let delivered = self.read(handle, &mut buf)?;
        buf.truncate(delivered);
        Ok(buf)
    }

    /// Replace the message on the handle's channel
    ///
    /// Returns the number of bytes accepted. No cursor is adjusted.
    pub fn write(&self, handle: HandleId, data: &[u8]) -> Result<usize> {
        let channel = self.handles.get(handle)?.lock().channel();
        let accepted = self.store.set_message(channel, data)?;
        log::trace!(
            "write: handle {} channel {}: {} of {} bytes",
            handle,
            channel,
            accepted,
            data.len()
        );
        Ok(accepted)
    }

    /// Replace the message on `channel` without going through a handle
    pub fn write_channel(&self, channel: ChannelId, data: &[u8]) -> Result<usize> {
        let accepted = self.store.set_message(channel, data)?;
        log::trace!("write: channel {}: {} of {} bytes", channel, accepted, data.len());
        Ok(accepted)
    }

    /// Release `handle`; closing twice fails
    pub fn close(&self, handle: HandleId) -> Result<()> {
        let cursor = self.handles.remove(handle)?;
        log::debug!("close: handle {} on channel {}", handle, cursor.channel());
        Ok(())
    }

    /// Current cursor offset of `handle`
    pub fn cursor(&self, handle: HandleId) -> Result<usize> {
        Ok(self.handles.get(handle)?.lock().offset())
    }

    /// Channel `handle` is bound to
    pub fn channel_of(&self, handle: HandleId) -> Result<ChannelId> {
        Ok(self.handles.get(handle)?.lock().channel())
    }

    /// Number of handles currently open
    pub fn open_handles(&self) -> usize {
        self.handles.len()
    }

    /// Open `channel` as a file-like session that closes itself on drop
    pub fn session(&self, channel: ChannelId) -> Result<Session<'_>> {
        let handle = self.open(channel)?;
        Ok(Session::new(self, handle))
    }

    /// Snapshot of the cursor record behind `handle`
    pub fn cursor_record(&self, handle: HandleId) -> Result<ReadCursor> {
        Ok(*self.handles.get(handle)?.lock())
    }
}
