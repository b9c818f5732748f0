//! Core game logic: deterministic, I/O-free, unit-testable.

pub mod clock;
pub mod rng;
pub mod session;

pub use clock::FrameClock;
pub use rng::SimpleRng;
pub use session::{GameSession, Obstacle, SessionStatus};
