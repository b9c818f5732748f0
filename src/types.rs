//! Core types shared across the application.
//! This module contains pure data types with no external dependencies.

/// Track dimensions (interior, excluding borders).
pub const TRACK_WIDTH: u16 = 20;
pub const TRACK_HEIGHT: u16 = 20;

/// Row the player marker lives on (bottom of the track).
pub const PLAYER_ROW: u16 = TRACK_HEIGHT - 1;

/// Game timing constants (in milliseconds).
pub const BASE_TICK_MS: u32 = 120;
pub const LEVEL_STEP_MS: u32 = 20;
pub const TICK_FLOOR_MS: u32 = 20;
pub const LOOP_YIELD_MS: u64 = 1;

/// Escape-sequence drain window: total budget, polled in small increments.
pub const ESC_DRAIN_TIMEOUT_MS: u64 = 100;
pub const ESC_DRAIN_POLL_MS: u64 = 8;

/// Difficulty levels.
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Points awarded when an obstacle clears the bottom edge.
pub const PASS_SCORE: u64 = 10;

/// Spawn policy: chance (percent) to spawn when the track is empty, and the
/// number of rows the newest obstacle must have travelled before another may
/// spawn behind it. Keeps roughly one obstacle in flight, not a queue.
pub const SPAWN_CHANCE_PERCENT: u32 = 30;
pub const SPAWN_MIN_GAP_ROWS: u16 = 2;

/// High-score file (single integer, plain text).
pub const HIGHSCORE_FILE: &str = "highscore.txt";

/// Clamp a requested difficulty level into the supported range.
pub fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Simulation tick interval for a difficulty level.
///
/// Monotonically decreasing in level (higher level = faster obstacles),
/// floored so a misconfigured level can never yield a zero-length interval.
pub fn tick_interval_ms(level: u8) -> u32 {
    BASE_TICK_MS
        .saturating_sub(u32::from(clamp_level(level)) * LEVEL_STEP_MS)
        .max(TICK_FLOOR_MS)
}

/// A decoded logical key token.
///
/// Every physical input the decoder recognizes normalizes to one of these,
/// so gameplay logic never branches on platform or on raw byte sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A single plain byte (printable characters, but also bare ESC and
    /// control bytes like Ctrl-C).
    Char(char),
    Up,
    Down,
    Left,
    Right,
    /// A multi-byte sequence the decoder did not recognize, kept verbatim
    /// so it can still be displayed and bound as a control.
    Other(Vec<u8>),
}

impl Key {
    /// Whether this token quits the current game.
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Char('Q') | Key::Char('\x03'))
    }

    /// Human-readable form for menus and the in-game status line.
    pub fn display(&self) -> String {
        match self {
            Key::Up => "UP_ARROW".to_string(),
            Key::Down => "DOWN_ARROW".to_string(),
            Key::Left => "LEFT_ARROW".to_string(),
            Key::Right => "RIGHT_ARROW".to_string(),
            Key::Char('\n') | Key::Char('\r') => "ENTER".to_string(),
            Key::Char(' ') => "SPACE".to_string(),
            Key::Char('\t') => "TAB".to_string(),
            Key::Char('\x1b') => "ESC".to_string(),
            Key::Char(c) if c.is_ascii_graphic() => c.to_string(),
            Key::Char(c) => format!("SEQ(0x{:02X})", *c as u32),
            Key::Other(bytes) => {
                let hex: Vec<String> = bytes.iter().map(|b| format!("0x{b:02X}")).collect();
                format!("SEQ({})", hex.join(" "))
            }
        }
    }
}

/// Rebindable movement controls. Bindings are data, not hardcoded keys:
/// any token the decoder can produce is a valid binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub left: Key,
    pub right: Key,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            left: Key::Char('a'),
            right: Key::Char('d'),
        }
    }
}

/// In-memory session configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub level: u8,
    pub bindings: Bindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: MIN_LEVEL,
            bindings: Bindings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_decreases_with_level() {
        let mut prev = u32::MAX;
        for level in MIN_LEVEL..=MAX_LEVEL {
            let interval = tick_interval_ms(level);
            assert!(interval < prev, "level {level} did not speed up");
            assert!(interval >= TICK_FLOOR_MS);
            prev = interval;
        }
    }

    #[test]
    fn test_tick_interval_floors_out_of_range_level() {
        // Levels outside 1..=5 clamp rather than underflow.
        assert_eq!(tick_interval_ms(200), tick_interval_ms(MAX_LEVEL));
        assert_eq!(tick_interval_ms(0), tick_interval_ms(MIN_LEVEL));
    }

    #[test]
    fn test_quit_tokens() {
        assert!(Key::Char('q').is_quit());
        assert!(Key::Char('Q').is_quit());
        assert!(Key::Char('\x03').is_quit());
        assert!(!Key::Char('x').is_quit());
        assert!(!Key::Left.is_quit());
    }

    #[test]
    fn test_key_display_forms() {
        assert_eq!(Key::Up.display(), "UP_ARROW");
        assert_eq!(Key::Char('a').display(), "a");
        assert_eq!(Key::Char(' ').display(), "SPACE");
        assert_eq!(Key::Char('\r').display(), "ENTER");
        assert_eq!(Key::Char('\x1b').display(), "ESC");
        assert_eq!(Key::Other(vec![0x1b, 0x4f, 0x41]).display(), "SEQ(0x1B 0x4F 0x41)");
    }

    #[test]
    fn test_default_bindings() {
        let b = Bindings::default();
        assert_eq!(b.left, Key::Char('a'));
        assert_eq!(b.right, Key::Char('d'));
    }
}
