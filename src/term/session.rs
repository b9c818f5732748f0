//! Scoped terminal session.
//!
//! Raw mode, the alternate screen, and cursor visibility are process-wide
//! terminal state. `TerminalSession` acquires all three on construction and
//! releases them exactly once, on `restore` or on drop, whichever comes
//! first. Every exit path (including `?` returns and panics) therefore puts
//! the parent shell back the way it was.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::term::backend::TerminalBackend;

pub struct TerminalSession<B: TerminalBackend, W: Write = io::Stdout> {
    backend: B,
    writer: W,
    restored: bool,
}

impl<B: TerminalBackend> TerminalSession<B> {
    /// Enter raw mode on stdout. Best-effort: a terminal that rejects raw
    /// mode leaves the session degraded but playable.
    pub fn new(backend: B) -> Self {
        Self::with_writer(backend, io::stdout())
    }
}

impl<B: TerminalBackend, W: Write> TerminalSession<B, W> {
    pub fn with_writer(backend: B, writer: W) -> Self {
        let mut session = Self {
            backend,
            writer,
            restored: false,
        };
        let _ = session.backend.enter_raw();
        let _ = session.enter_screen();
        session
    }

    fn enter_screen(&mut self) -> io::Result<()> {
        self.writer.queue(terminal::EnterAlternateScreen)?;
        self.writer.queue(cursor::Hide)?;
        self.writer.queue(terminal::DisableLineWrap)?;
        self.writer.flush()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Restore the terminal. Idempotent, and safe even if raw mode was
    /// never successfully entered. Failures are swallowed: there is nothing
    /// useful to do with a terminal that cannot be restored, and aborting
    /// here would mask the error that brought us down.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = self.writer.queue(ResetColor);
        let _ = self.writer.queue(SetAttribute(Attribute::Reset));
        let _ = self.writer.queue(terminal::EnableLineWrap);
        let _ = self.writer.queue(cursor::Show);
        let _ = self.writer.queue(terminal::LeaveAlternateScreen);
        let _ = self.writer.flush();
        let _ = self.backend.leave_raw();
    }
}

impl<B: TerminalBackend, W: Write> Drop for TerminalSession<B, W> {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use crate::input::ByteSource;

    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockBackend {
        enters: Rc<Cell<u32>>,
        leaves: Rc<Cell<u32>>,
        raw: bool,
    }

    impl ByteSource for MockBackend {
        fn read_byte(&mut self) -> Option<u8> {
            None
        }
    }

    impl TerminalBackend for MockBackend {
        fn enter_raw(&mut self) -> Result<()> {
            self.enters.set(self.enters.get() + 1);
            self.raw = true;
            Ok(())
        }

        fn leave_raw(&mut self) -> Result<()> {
            self.leaves.set(self.leaves.get() + 1);
            self.raw = false;
            Ok(())
        }

        fn is_raw(&self) -> bool {
            self.raw
        }
    }

    fn mock() -> (MockBackend, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let backend = MockBackend::default();
        let enters = Rc::clone(&backend.enters);
        let leaves = Rc::clone(&backend.leaves);
        (backend, enters, leaves)
    }

    #[test]
    fn test_restore_is_idempotent() {
        let (backend, _, leaves) = mock();
        let mut session = TerminalSession::with_writer(backend, Vec::new());
        session.restore();
        session.restore();
        assert_eq!(leaves.get(), 1);
        assert!(session.is_restored());
    }

    #[test]
    fn test_drop_restores_once() {
        let (backend, enters, leaves) = mock();
        {
            let _session = TerminalSession::with_writer(backend, Vec::new());
            assert_eq!(enters.get(), 1);
        }
        assert_eq!(leaves.get(), 1);
    }

    #[test]
    fn test_explicit_restore_then_drop_leaves_once() {
        let (backend, _, leaves) = mock();
        let mut session = TerminalSession::with_writer(backend, Vec::new());
        session.restore();
        assert_eq!(leaves.get(), 1);
        drop(session);
        assert_eq!(leaves.get(), 1);
    }

    #[test]
    fn test_screen_setup_is_written_on_entry() {
        let session = TerminalSession::with_writer(MockBackend::default(), Vec::new());
        // Alternate-screen and hide-cursor sequences were queued and flushed.
        assert!(!session.writer.is_empty());
    }
}
