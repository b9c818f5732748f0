//! Terminal lane-dodging racer.
//!
//! The player steers a marker along the bottom of a fixed-width track while
//! obstacles scroll down toward it. The interesting parts live in `term`
//! (raw-mode terminal control behind a backend trait) and `input`
//! (non-blocking escape-sequence decoding); `core` holds the deterministic
//! simulation and `ui` the menu screens.

pub mod core;
pub mod input;
pub mod score;
pub mod term;
pub mod types;
pub mod ui;
