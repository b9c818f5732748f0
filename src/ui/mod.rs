//! Menu and summary screens.
//!
//! Pure framebuffer builders plus the key-to-choice mappings; the drivers in
//! `main` poll the decoder and redraw. Everything here runs inside the same
//! raw-mode session as gameplay, so screens are key-driven rather than
//! line-driven.

use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::term::game_view::Viewport;
use crate::types::{clamp_level, Bindings, Key, Settings, MAX_LEVEL, MIN_LEVEL};

/// Top-level menu entries, selected by digit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    SelectLevel,
    Controls,
    HighScore,
    Exit,
}

/// Map a decoded token to a menu entry.
pub fn choice_for_key(key: &Key) -> Option<MenuChoice> {
    match key {
        Key::Char('1') => Some(MenuChoice::NewGame),
        Key::Char('2') => Some(MenuChoice::SelectLevel),
        Key::Char('3') => Some(MenuChoice::Controls),
        Key::Char('4') => Some(MenuChoice::HighScore),
        Key::Char('5') | Key::Char('q') | Key::Char('Q') => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Map a digit token to a difficulty level, if in range.
pub fn level_for_key(key: &Key) -> Option<u8> {
    match key {
        Key::Char(c @ '1'..='9') => {
            let level = *c as u8 - b'0';
            (MIN_LEVEL..=MAX_LEVEL).contains(&level).then_some(level)
        }
        _ => None,
    }
}

/// Which movement control a rebind prompt is capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindStage {
    Left,
    Right,
}

fn screen(viewport: Viewport, lines: &[(u16, String, CellStyle)]) -> FrameBuffer {
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    for (row, text, style) in lines {
        fb.put_str(2, *row, text, *style);
    }
    fb
}

fn title_style() -> CellStyle {
    CellStyle::bold(Rgb::new(240, 220, 100))
}

fn body_style() -> CellStyle {
    CellStyle::default()
}

fn hint_style() -> CellStyle {
    CellStyle::fg(Rgb::new(150, 150, 170))
}

pub fn render_menu(settings: &Settings, highest: u64, viewport: Viewport) -> FrameBuffer {
    screen(
        viewport,
        &[
            (1, "--- TERMINAL RACER ---".to_string(), title_style()),
            (
                3,
                format!("1. New Game (Level: {})", settings.level),
                body_style(),
            ),
            (4, "2. Select Level (1-5)".to_string(), body_style()),
            (
                5,
                format!(
                    "3. Controls (Left: '{}', Right: '{}')",
                    settings.bindings.left.display(),
                    settings.bindings.right.display()
                ),
                body_style(),
            ),
            (6, format!("4. Highest Score: {highest}"), body_style()),
            (7, "5. Exit".to_string(), body_style()),
            (9, "Press 1-5 to choose.".to_string(), hint_style()),
        ],
    )
}

pub fn render_level_select(current: u8, viewport: Viewport) -> FrameBuffer {
    screen(
        viewport,
        &[
            (1, "--- SELECT DIFFICULTY ---".to_string(), title_style()),
            (
                3,
                format!("Levels: 1 (Easy) to 5 (Hardest). Current: {current}"),
                body_style(),
            ),
            (
                5,
                "Press 1-5 to set the level, or any other key to go back.".to_string(),
                hint_style(),
            ),
        ],
    )
}

pub fn render_rebind(stage: RebindStage, bindings: &Bindings, viewport: Viewport) -> FrameBuffer {
    let prompt = match stage {
        RebindStage::Left => "Press any key now to set the NEW Left control (arrow keys work).",
        RebindStage::Right => "Press any key now to set the NEW Right control (arrow keys work).",
    };
    screen(
        viewport,
        &[
            (1, "--- CONTROL CUSTOMIZATION ---".to_string(), title_style()),
            (
                3,
                format!("Current Left Key : {}", bindings.left.display()),
                body_style(),
            ),
            (
                4,
                format!("Current Right Key: {}", bindings.right.display()),
                body_style(),
            ),
            (6, prompt.to_string(), hint_style()),
        ],
    )
}

pub fn render_rebind_confirm(bindings: &Bindings, viewport: Viewport) -> FrameBuffer {
    screen(
        viewport,
        &[
            (1, "--- CONTROL CUSTOMIZATION ---".to_string(), title_style()),
            (
                3,
                format!(
                    "Controls Updated! Left: '{}'  Right: '{}'",
                    bindings.left.display(),
                    bindings.right.display()
                ),
                body_style(),
            ),
            (5, "Press any key to return to the menu.".to_string(), hint_style()),
        ],
    )
}

pub fn render_high_score(highest: u64, viewport: Viewport) -> FrameBuffer {
    screen(
        viewport,
        &[
            (1, "--- HIGHEST SCORE ---".to_string(), title_style()),
            (3, format!("Highest Score: {highest}"), body_style()),
            (5, "Press any key to return to the menu.".to_string(), hint_style()),
        ],
    )
}

pub fn render_game_over(score: u64, highest: u64, viewport: Viewport) -> FrameBuffer {
    screen(
        viewport,
        &[
            (1, "*** GAME OVER ***".to_string(), title_style()),
            (3, format!("Final Score:   {score}"), body_style()),
            (4, format!("Highest Score: {highest}"), body_style()),
            (
                6,
                "Press any key to return to the main menu.".to_string(),
                hint_style(),
            ),
        ],
    )
}

/// Apply a captured level-select key to settings. Returns true if changed.
pub fn apply_level_choice(settings: &mut Settings, key: &Key) -> bool {
    if let Some(level) = level_for_key(key) {
        settings.level = clamp_level(level);
        true
    } else {
        false
    }
}
