//! Terminal capability backends.
//!
//! The decoder and game loop are written once against [`TerminalBackend`];
//! only the backend knows how raw mode and non-blocking byte reads are
//! obtained on a given platform. On Unix this is direct termios control
//! (`VMIN=0`/`VTIME=0` makes plain reads non-blocking). Elsewhere crossterm's
//! event stream is re-encoded into the same CSI byte stream, so equivalent
//! physical input produces identical bytes everywhere.

use anyhow::Result;

use crate::input::ByteSource;

/// Raw-mode control plus a non-blocking byte stream.
///
/// `enter_raw`/`leave_raw` are best-effort at the call sites: a terminal
/// that refuses raw mode degrades the experience but must not abort the
/// game. `leave_raw` is a no-op when raw mode was never entered, and the
/// configuration saved on first entry is never mutated afterwards.
pub trait TerminalBackend: ByteSource {
    fn enter_raw(&mut self) -> Result<()>;
    fn leave_raw(&mut self) -> Result<()>;
    fn is_raw(&self) -> bool;
}

#[cfg(unix)]
pub use unix::StdinBackend;

#[cfg(not(unix))]
pub use event::StdinBackend;

#[cfg(unix)]
mod unix {
    use std::io;

    use anyhow::{anyhow, Result};

    use crate::input::ByteSource;

    use super::TerminalBackend;

    /// Unix backend: termios on stdin.
    pub struct StdinBackend {
        saved: Option<libc::termios>,
        raw_active: bool,
    }

    impl StdinBackend {
        pub fn new() -> Self {
            Self {
                saved: None,
                raw_active: false,
            }
        }
    }

    impl Default for StdinBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TerminalBackend for StdinBackend {
        fn enter_raw(&mut self) -> Result<()> {
            let mut attrs = unsafe { std::mem::zeroed::<libc::termios>() };
            if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &mut attrs) } != 0 {
                return Err(anyhow!(
                    "tcgetattr failed: {}",
                    io::Error::last_os_error()
                ));
            }

            // Only the first entry captures the baseline; re-entering raw
            // mode must not overwrite it with an already-raw configuration.
            if self.saved.is_none() {
                self.saved = Some(attrs);
            }

            let mut raw = attrs;
            raw.c_lflag &= !(libc::ICANON | libc::ECHO);
            raw.c_cc[libc::VMIN] = 0;
            raw.c_cc[libc::VTIME] = 0;
            if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw) } != 0 {
                return Err(anyhow!(
                    "tcsetattr failed: {}",
                    io::Error::last_os_error()
                ));
            }
            self.raw_active = true;
            Ok(())
        }

        fn leave_raw(&mut self) -> Result<()> {
            let Some(saved) = self.saved else {
                // Never entered raw mode: nothing to restore.
                return Ok(());
            };
            if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &saved) } != 0 {
                return Err(anyhow!(
                    "restoring termios failed: {}",
                    io::Error::last_os_error()
                ));
            }
            self.raw_active = false;
            Ok(())
        }

        fn is_raw(&self) -> bool {
            self.raw_active
        }
    }

    impl ByteSource for StdinBackend {
        fn read_byte(&mut self) -> Option<u8> {
            let mut buf = [0u8; 1];
            // With VMIN=0/VTIME=0 this returns immediately when no byte is
            // pending.
            let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), 1) };
            (n == 1).then_some(buf[0])
        }
    }

}

#[cfg(not(unix))]
mod event {
    use std::collections::VecDeque;
    use std::time::Duration;

    use anyhow::Result;
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

    use crate::input::ByteSource;

    use super::TerminalBackend;

    /// Event-stream backend for platforms without termios.
    ///
    /// Decoded key events are re-encoded as the canonical CSI byte
    /// sequences, mirroring how the Unix byte stream looks, so the shared
    /// decoder sees one wire format.
    pub struct StdinBackend {
        queue: VecDeque<u8>,
        raw_active: bool,
    }

    impl StdinBackend {
        pub fn new() -> Self {
            Self {
                queue: VecDeque::new(),
                raw_active: false,
            }
        }

        fn pump(&mut self) {
            while event::poll(Duration::ZERO).unwrap_or(false) {
                let Ok(Event::Key(key)) = event::read() else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Up => self.queue.extend([0x1b, b'[', b'A']),
                    KeyCode::Down => self.queue.extend([0x1b, b'[', b'B']),
                    KeyCode::Right => self.queue.extend([0x1b, b'[', b'C']),
                    KeyCode::Left => self.queue.extend([0x1b, b'[', b'D']),
                    KeyCode::Enter => self.queue.push_back(b'\r'),
                    KeyCode::Tab => self.queue.push_back(b'\t'),
                    KeyCode::Esc => self.queue.push_back(0x1b),
                    KeyCode::Backspace => self.queue.push_back(0x7f),
                    KeyCode::Char(c) => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic()
                        {
                            self.queue.push_back((c.to_ascii_uppercase() as u8) & 0x1f);
                        } else {
                            let mut utf8 = [0u8; 4];
                            self.queue.extend(c.encode_utf8(&mut utf8).bytes());
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    impl Default for StdinBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TerminalBackend for StdinBackend {
        fn enter_raw(&mut self) -> Result<()> {
            crossterm::terminal::enable_raw_mode()?;
            self.raw_active = true;
            Ok(())
        }

        fn leave_raw(&mut self) -> Result<()> {
            if !self.raw_active {
                return Ok(());
            }
            crossterm::terminal::disable_raw_mode()?;
            self.raw_active = false;
            Ok(())
        }

        fn is_raw(&self) -> bool {
            self.raw_active
        }
    }

    impl ByteSource for StdinBackend {
        fn read_byte(&mut self) -> Option<u8> {
            if self.queue.is_empty() {
                self.pump();
            }
            self.queue.pop_front()
        }
    }
}
