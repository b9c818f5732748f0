//! Terminal layer: raw-mode control, byte-level input backends, and a
//! framebuffer renderer.
//!
//! Everything above this module is platform-neutral; the backend trait is
//! the only seam that knows how a given OS does raw mode and non-blocking
//! reads.

pub mod backend;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod session;

pub use backend::{StdinBackend, TerminalBackend};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
pub use session::TerminalSession;
