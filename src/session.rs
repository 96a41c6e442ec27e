//! File-like session over one handle
//!
//! Wraps open/read/write/close so a channel can be driven through
//! `std::io::Read` and `std::io::Write`, the way a device node is.

use crate::access::ChannelAccess;
use crate::cursor::HandleId;
use crate::error::Result;
use std::io;

/// Open handle that is closed when dropped
pub struct Session<'a> {
    access: &'a ChannelAccess,
    handle: HandleId,
    closed: bool,
}

impl<'a> Session<'a> {
    pub(crate) fn new(access: &'a ChannelAccess, handle: HandleId) -> Self {
        Self {
            access,
            handle,
            closed: false,
        }
    }

    /// Handle backing this session
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// Close now and report the outcome instead of closing on drop
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.access.close(self.handle)
    }
}

impl io::Read for Session<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.access.read(self.handle, buf)?)
    }
}

impl io::Write for Session<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.access.write(self.handle, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.access.close(self.handle) {
            log::warn!("session drop: {}", e);
        }
    }
}
