//! Game session state and rules.
//!
//! One `GameSession` is one run of the game; a fresh session is constructed
//! for every new game. All state is explicit so multiple sessions can exist
//! side by side (and so tests never touch a real terminal).

use std::collections::VecDeque;

use crate::core::rng::SimpleRng;
use crate::types::{
    clamp_level, Bindings, Key, PASS_SCORE, PLAYER_ROW, SPAWN_CHANCE_PERCENT, SPAWN_MIN_GAP_ROWS,
    TRACK_HEIGHT, TRACK_WIDTH,
};

/// One falling obstacle. Rows grow downward; row 0 is the top of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub col: u16,
    pub row: u16,
}

/// Session lifecycle. There is no transition back from `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    GameOver,
}

/// Full state of one game run.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Player column within the track interior (`0..TRACK_WIDTH`).
    pub player_col: u16,
    /// Obstacles in flight, front = oldest (closest to the bottom).
    pub obstacles: VecDeque<Obstacle>,
    pub score: u64,
    pub level: u8,
    pub status: SessionStatus,
    rng: SimpleRng,
}

impl GameSession {
    pub fn new(level: u8, rng: SimpleRng) -> Self {
        Self {
            player_col: TRACK_WIDTH / 2,
            obstacles: VecDeque::new(),
            score: 0,
            level: clamp_level(level),
            status: SessionStatus::Running,
            rng,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Map a decoded token through the current bindings.
    ///
    /// Bindings win over the quit fallback, so a player who rebinds `q` as a
    /// movement key still moves with it. An unbound quit token ends the
    /// session immediately; movement is clamped to the track interior.
    pub fn apply_key(&mut self, key: &Key, bindings: &Bindings) {
        if !self.is_running() {
            return;
        }
        if *key == bindings.left {
            self.player_col = self.player_col.saturating_sub(1);
        } else if *key == bindings.right {
            if self.player_col + 1 < TRACK_WIDTH {
                self.player_col += 1;
            }
        } else if key.is_quit() {
            self.status = SessionStatus::GameOver;
        }
    }

    /// One simulation tick: advance, score, spawn, then check collision.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        for obstacle in &mut self.obstacles {
            obstacle.row += 1;
        }

        // Obstacles leave in arrival order, so only the front can be past
        // the bottom edge. Each one scores exactly once, on eviction.
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.row >= TRACK_HEIGHT)
        {
            self.obstacles.pop_front();
            self.score += PASS_SCORE;
        }

        if self.should_spawn() {
            let col = self.rng.next_range(u32::from(TRACK_WIDTH)) as u16;
            self.obstacles.push_back(Obstacle { col, row: 0 });
        }

        if self.collision() {
            self.status = SessionStatus::GameOver;
        }
    }

    /// Spawn when the track is empty (with a small random chance) or once
    /// the newest obstacle has moved far enough from the top. Keeps roughly
    /// one obstacle in flight rather than a queue.
    fn should_spawn(&mut self) -> bool {
        match self.obstacles.back() {
            None => self.rng.chance(SPAWN_CHANCE_PERCENT),
            Some(last) => last.row >= SPAWN_MIN_GAP_ROWS,
        }
    }

    fn collision(&self) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.row == PLAYER_ROW && o.col == self.player_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(1, SimpleRng::new(12345))
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.player_col, TRACK_WIDTH / 2);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.score, 0);
        assert!(s.is_running());
    }

    #[test]
    fn test_movement_clamped_to_track() {
        let bindings = Bindings::default();
        let mut s = session();

        for _ in 0..100 {
            s.apply_key(&Key::Char('a'), &bindings);
        }
        assert_eq!(s.player_col, 0);

        for _ in 0..100 {
            s.apply_key(&Key::Char('d'), &bindings);
        }
        assert_eq!(s.player_col, TRACK_WIDTH - 1);
    }

    #[test]
    fn test_rebound_keys_control_movement() {
        let bindings = Bindings {
            left: Key::Left,
            right: Key::Other(vec![0x1b, 0x4f, 0x43]),
        };
        let mut s = session();
        let start = s.player_col;

        s.apply_key(&Key::Left, &bindings);
        assert_eq!(s.player_col, start - 1);

        // The old defaults are no longer bound.
        s.apply_key(&Key::Char('a'), &bindings);
        assert_eq!(s.player_col, start - 1);

        s.apply_key(&Key::Other(vec![0x1b, 0x4f, 0x43]), &bindings);
        assert_eq!(s.player_col, start);
    }

    #[test]
    fn test_quit_token_ends_session() {
        let bindings = Bindings::default();
        let mut s = session();
        s.apply_key(&Key::Char('q'), &bindings);
        assert_eq!(s.status, SessionStatus::GameOver);

        // No transition back; further input is ignored.
        s.apply_key(&Key::Char('a'), &bindings);
        assert_eq!(s.status, SessionStatus::GameOver);
    }

    #[test]
    fn test_binding_shadows_quit_fallback() {
        let bindings = Bindings {
            left: Key::Char('q'),
            right: Key::Char('d'),
        };
        let mut s = session();
        let start = s.player_col;
        s.apply_key(&Key::Char('q'), &bindings);
        assert!(s.is_running());
        assert_eq!(s.player_col, start - 1);
    }

    #[test]
    fn test_obstacles_advance_one_row_per_tick() {
        let mut s = session();
        s.obstacles.push_back(Obstacle { col: 3, row: 0 });
        s.tick();
        assert_eq!(s.obstacles[0].row, 1);
    }

    #[test]
    fn test_passing_obstacle_scores_exactly_once() {
        let mut s = session();
        s.player_col = 0;
        s.obstacles.push_back(Obstacle {
            col: 5,
            row: TRACK_HEIGHT - 1,
        });

        s.tick();
        assert_eq!(s.score, PASS_SCORE);
        assert!(!s.obstacles.iter().any(|o| o.col == 5 && o.row >= TRACK_HEIGHT));

        let score_after = s.score;
        s.tick();
        // The evicted obstacle must not score again; anything newly spawned
        // is still at the top and cannot have scored either.
        assert_eq!(s.score, score_after);
    }

    #[test]
    fn test_collision_on_player_column_ends_game() {
        let mut s = session();
        s.player_col = 7;
        s.obstacles.push_back(Obstacle {
            col: 7,
            row: PLAYER_ROW - 1,
        });
        s.tick();
        assert_eq!(s.status, SessionStatus::GameOver);
    }

    #[test]
    fn test_no_collision_on_other_column() {
        let mut s = session();
        s.player_col = 7;
        s.obstacles.push_back(Obstacle {
            col: 8,
            row: PLAYER_ROW - 1,
        });
        s.tick();
        assert!(s.is_running());
    }

    #[test]
    fn test_spawn_waits_for_gap() {
        let mut s = session();
        s.obstacles.push_back(Obstacle { col: 0, row: 0 });

        // Newest obstacle at row 1 after this tick: below the gap, no spawn.
        s.tick();
        assert_eq!(s.obstacles.len(), 1);

        // Row 2 reaches the gap: a second obstacle may spawn.
        s.tick();
        assert_eq!(s.obstacles.len(), 2);
        assert_eq!(s.obstacles[1].row, 0);
        assert!(s.obstacles[1].col < TRACK_WIDTH);
    }

    #[test]
    fn test_empty_track_eventually_spawns() {
        let mut s = session();
        for _ in 0..100 {
            s.tick();
            if !s.obstacles.is_empty() {
                return;
            }
        }
        panic!("no obstacle spawned in 100 ticks on an empty track");
    }

    #[test]
    fn test_tick_is_inert_after_game_over() {
        let mut s = session();
        s.status = SessionStatus::GameOver;
        s.obstacles.push_back(Obstacle { col: 1, row: 1 });
        s.tick();
        assert_eq!(s.obstacles[0].row, 1);
    }
}
