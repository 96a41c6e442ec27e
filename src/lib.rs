//! chardev_channels - single-message channels with independent read cursors
//!
//! A fixed table of channels, each holding at most one bounded message.
//! Any number of handles can be opened on a channel; each handle reads the
//! current message through its own cursor without disturbing the others.
//!
//! # Architecture
//!
//! - **ChannelStore**: the channel table, one lock per channel
//! - **ReadCursor / HandleTable**: per-handle read position
//! - **ChannelAccess**: open, read, write and close over a shared store
//!
//! # Read protocol
//!
//! A read delivers bytes from the handle's cursor up to the end of the
//! message. Once the whole message has been delivered the cursor wraps to 0,
//! so the next read starts over. Writes replace the message wholesale and
//! never move any cursor.
//!
//! ```
//! use chardev_channels::{ChannelAccess, ChannelConfig};
//!
//! let access = ChannelAccess::with_config(&ChannelConfig::default())?;
//! let h = access.open(0)?;
//! access.write(h, b"Hello World")?;
//! assert_eq!(access.read_to_vec(h, 7)?, b"Hello W");
//! assert_eq!(access.read_to_vec(h, 1)?, b"o");
//! assert_eq!(access.read_to_vec(h, 7)?, b"rld");
//! assert_eq!(access.read_to_vec(h, 1)?, b"H");
//! access.close(h)?;
//! # Ok::<(), chardev_channels::ChannelError>(())
//! ```

pub mod error;
pub mod config;
pub mod store;
pub mod cursor;
pub mod access;
pub mod session;

pub use error::{ChannelError, Result};
pub use config::{ChannelConfig, DEFAULT_CHANNEL_COUNT, DEFAULT_MAX_MESSAGE_LEN};
pub use store::{ChannelId, ChannelStore, MessageSnapshot};
pub use cursor::{HandleId, ReadCursor, ReadOutcome};
pub use access::ChannelAccess;
pub use session::Session;
