//! Non-blocking keyboard input.
//!
//! Raw-mode terminals deliver arrow keys as multi-byte escape sequences that
//! arrive in a burst but not atomically. The decoder here turns that byte
//! stream into [`Key`](crate::types::Key) tokens without ever blocking the
//! game loop for more than a short, bounded window.

pub mod decoder;

pub use decoder::{ByteSource, Clock, KeyDecoder, SystemClock};
