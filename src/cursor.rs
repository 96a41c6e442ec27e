//! Read cursors and the handle table
//!
//! A handle binds one open session to one channel and records how far into
//! that channel's current message the session has read. Cursors are never
//! touched by writes; a write that shrinks the message below a cursor leaves
//! that handle starved until a later write grows the message again.

use crate::error::{ChannelError, Result};
use crate::store::ChannelId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// Source of table identities, so handles from one table are foreign to another
static NEXT_TABLE_ID: AtomicU32 = AtomicU32::new(1);

/// Opaque identifier returned by `open`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    table: u32,
    serial: u64,
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.serial)
    }
}

/// Outcome of one read step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Bytes copied to the caller
    pub delivered: usize,
    /// Cursor was returned to 0 because the message was fully delivered
    pub reset: bool,
    /// Cursor lies past the end of the message
    pub starved: bool,
}

/// Per-handle read position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCursor {
    channel: ChannelId,
    offset: usize,
}

impl ReadCursor {
    /// Fresh cursor at the start of `channel`'s message
    pub fn new(channel: ChannelId) -> Self {
        Self { channel, offset: 0 }
    }

    #[inline]
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Deliver bytes of `message` starting at the cursor into `buf`
    ///
    /// At most `buf.len()` bytes are copied. Once the cursor lands exactly on
    /// the end of the message (including an empty message) it wraps to 0.
    /// A cursor already past the end delivers nothing and stays put.
    pub fn deliver(&mut self, message: &[u8], buf: &mut [u8]) -> ReadOutcome {
        let len = message.len();
        let start = self.offset;
        let available = len.saturating_sub(start);
        let delivered = buf.len().min(available);

        if delivered > 0 {
            buf[..delivered].copy_from_slice(&message[start..start + delivered]);
        }

        let next = start + delivered;
        let reset = next == len;
        self.offset = if reset { 0 } else { next };

        ReadOutcome {
            delivered,
            reset,
            starved: start > len,
        }
    }
}

/// Table of open handles
///
/// The table lock is held only to look up, insert or remove an entry. Each
/// cursor has its own lock so reads on different handles never contend.
pub struct HandleTable {
    id: u32,
    next_serial: AtomicU64,
    entries: Mutex<HashMap<u64, Arc<Mutex<ReadCursor>>>>,
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            next_serial: AtomicU64::new(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Allocate a handle with a fresh cursor on `channel`
    pub fn insert(&self, channel: ChannelId) -> HandleId {
        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .insert(serial, Arc::new(Mutex::new(ReadCursor::new(channel))));
        HandleId {
            table: self.id,
            serial,
        }
    }

    /// Look up the cursor behind `handle`
    pub fn get(&self, handle: HandleId) -> Result<Arc<Mutex<ReadCursor>>> {
        if handle.table != self.id {
            return Err(ChannelError::InvalidHandle(handle));
        }
        self.entries
            .lock()
            .get(&handle.serial)
            .cloned()
            .ok_or(ChannelError::InvalidHandle(handle))
    }

    /// Release `handle`, returning its final cursor
    pub fn remove(&self, handle: HandleId) -> Result<ReadCursor> {
        if handle.table != self.id {
            return Err(ChannelError::InvalidHandle(handle));
        }
        let entry = self
            .entries
            .lock()
            .remove(&handle.serial)
            .ok_or(ChannelError::InvalidHandle(handle))?;
        let cursor = *entry.lock();
        Ok(cursor)
    }

    /// Number of open handles
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
