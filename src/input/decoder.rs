//! Escape-sequence decoder.
//!
//! `poll_key` is called once per loop iteration. It returns immediately when
//! nothing is buffered; only after an ESC introducer does it wait, and then
//! only inside a fixed drain window, sleeping in small increments while the
//! rest of the sequence straggles in. Both the byte source and the clock are
//! injected so the decoder is testable without a terminal or real timing.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{Key, ESC_DRAIN_POLL_MS, ESC_DRAIN_TIMEOUT_MS};

const ESC: u8 = 0x1b;

/// Longest sequence the decoder will accumulate before giving up and
/// surfacing the bytes as-is.
const MAX_SEQ_LEN: usize = 16;

/// Non-blocking byte supplier. `None` means nothing is available right now,
/// not end-of-stream.
pub trait ByteSource {
    fn read_byte(&mut self) -> Option<u8>;
}

/// Time source for the bounded drain. Injected so tests can run on a
/// virtual timeline.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Decodes one logical key token per poll.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    drain_timeout: Duration,
    drain_poll: Duration,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            drain_timeout: Duration::from_millis(ESC_DRAIN_TIMEOUT_MS),
            drain_poll: Duration::from_millis(ESC_DRAIN_POLL_MS),
        }
    }

    /// Poll for one token. Never blocks when the source is empty.
    ///
    /// - `None`: nothing available this poll.
    /// - Plain byte: returned as `Key::Char`.
    /// - ESC introducer: bytes are drained inside the timeout window. A
    ///   recognized arrow sequence returns as soon as it is complete; an
    ///   expired window returns bare ESC (nothing followed) or the raw
    ///   accumulated bytes as `Key::Other` (never silently dropped).
    pub fn poll_key<S: ByteSource, C: Clock>(&self, source: &mut S, clock: &mut C) -> Option<Key> {
        let first = source.read_byte()?;
        if first != ESC {
            return Some(Key::Char(char::from(first)));
        }

        let mut seq = ArrayVec::<u8, MAX_SEQ_LEN>::new();
        seq.push(ESC);
        let deadline = clock.now() + self.drain_timeout;

        loop {
            while let Some(byte) = source.read_byte() {
                seq.push(byte);
                if let Some(key) = classify_arrow(&seq) {
                    return Some(key);
                }
                if seq.is_full() {
                    return Some(Key::Other(seq.to_vec()));
                }
            }
            if clock.now() >= deadline {
                break;
            }
            clock.sleep(self.drain_poll);
        }

        if seq.len() == 1 {
            // The window expired with the introducer alone: a real ESC press.
            Some(Key::Char(char::from(ESC)))
        } else {
            Some(Key::Other(seq.to_vec()))
        }
    }
}

/// The four 3-byte CSI sequences this game recognizes. Anything else is the
/// caller's problem to display or bind verbatim.
fn classify_arrow(seq: &[u8]) -> Option<Key> {
    match seq {
        [ESC, b'[', b'A'] => Some(Key::Up),
        [ESC, b'[', b'B'] => Some(Key::Down),
        [ESC, b'[', b'C'] => Some(Key::Right),
        [ESC, b'[', b'D'] => Some(Key::Left),
        _ => None,
    }
}
