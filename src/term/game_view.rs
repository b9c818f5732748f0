//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::session::GameSession;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Bindings, PLAYER_ROW, TRACK_HEIGHT, TRACK_WIDTH};

pub const PLAYER_CHAR: char = '@';
pub const OBSTACLE_CHAR: char = '#';
pub const BORDER_CHAR: char = '|';
pub const ROAD_CHAR: char = ' ';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the track, centered in the viewport, with a status line below.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    /// Top-left corner of the track frame (borders included) for a viewport.
    pub fn origin(viewport: Viewport) -> (u16, u16) {
        let frame_w = TRACK_WIDTH + 2;
        let frame_h = TRACK_HEIGHT + 1;
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    pub fn render(
        &self,
        session: &GameSession,
        bindings: &Bindings,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let (ox, oy) = Self::origin(viewport);

        let border = CellStyle::fg(Rgb::new(150, 150, 150));
        let road = CellStyle::default();
        let player = CellStyle::bold(Rgb::new(80, 220, 120));
        let obstacle = CellStyle::bold(Rgb::new(230, 90, 70));
        let status = CellStyle::fg(Rgb::new(180, 180, 200));

        for row in 0..TRACK_HEIGHT {
            fb.put_char(ox, oy + row, BORDER_CHAR, border);
            for col in 0..TRACK_WIDTH {
                fb.put_char(ox + 1 + col, oy + row, ROAD_CHAR, road);
            }
            fb.put_char(ox + 1 + TRACK_WIDTH, oy + row, BORDER_CHAR, border);
        }

        for o in &session.obstacles {
            if o.row < TRACK_HEIGHT {
                fb.put_char(ox + 1 + o.col, oy + o.row, OBSTACLE_CHAR, obstacle);
            }
        }

        fb.put_char(ox + 1 + session.player_col, oy + PLAYER_ROW, PLAYER_CHAR, player);

        let line = format!(
            "Score: {} | Level: {} | Controls: Left={} Right={}",
            session.score,
            session.level,
            bindings.left.display(),
            bindings.right.display()
        );
        fb.put_str(ox, oy + TRACK_HEIGHT, &line, status);

        fb
    }
}
