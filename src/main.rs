//! Terminal racer runner (default binary).
//!
//! Owns the raw-mode session for the whole process lifetime, drives the
//! menus, and runs the fixed-timestep game loop: poll input once, advance
//! the simulation when the frame clock allows it, draw, yield.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use tui_racer::core::{FrameClock, GameSession, SimpleRng};
use tui_racer::input::{KeyDecoder, SystemClock};
use tui_racer::score::HighScoreStore;
use tui_racer::term::{GameView, StdinBackend, TerminalRenderer, TerminalSession, Viewport};
use tui_racer::types::{Key, Settings, LOOP_YIELD_MS};
use tui_racer::ui::{self, MenuChoice, RebindStage};

const MENU_POLL_MS: u64 = 25;

type Term = TerminalSession<StdinBackend>;

fn main() -> Result<()> {
    let mut term = TerminalSession::new(StdinBackend::new());
    let result = run(&mut term);

    // Restore before the error (if any) reaches the parent shell; raw-mode
    // leakage is the one failure mode that must never happen.
    term.restore();
    result
}

fn run(term: &mut Term) -> Result<()> {
    let store = HighScoreStore::default_location();
    let mut highest = store.load();
    let mut settings = Settings::default();
    let mut renderer = TerminalRenderer::new();
    let decoder = KeyDecoder::new();
    let mut clock = SystemClock;

    loop {
        renderer.draw(&ui::render_menu(&settings, highest, viewport()))?;
        let key = wait_key(term, &decoder, &mut clock);
        let Some(choice) = ui::choice_for_key(&key) else {
            continue;
        };

        match choice {
            MenuChoice::NewGame => {
                let score = play(term, &mut renderer, &decoder, &mut clock, &settings)?;
                highest = store.record(score);
                renderer.draw(&ui::render_game_over(score, highest, viewport()))?;
                wait_key(term, &decoder, &mut clock);
            }
            MenuChoice::SelectLevel => {
                renderer.draw(&ui::render_level_select(settings.level, viewport()))?;
                let key = wait_key(term, &decoder, &mut clock);
                ui::apply_level_choice(&mut settings, &key);
            }
            MenuChoice::Controls => {
                renderer.draw(&ui::render_rebind(
                    RebindStage::Left,
                    &settings.bindings,
                    viewport(),
                ))?;
                settings.bindings.left = wait_key(term, &decoder, &mut clock);

                renderer.draw(&ui::render_rebind(
                    RebindStage::Right,
                    &settings.bindings,
                    viewport(),
                ))?;
                settings.bindings.right = wait_key(term, &decoder, &mut clock);

                renderer.draw(&ui::render_rebind_confirm(&settings.bindings, viewport()))?;
                wait_key(term, &decoder, &mut clock);
            }
            MenuChoice::HighScore => {
                renderer.draw(&ui::render_high_score(highest, viewport()))?;
                wait_key(term, &decoder, &mut clock);
            }
            MenuChoice::Exit => return Ok(()),
        }
    }
}

/// One game run; returns the final score.
fn play(
    term: &mut Term,
    renderer: &mut TerminalRenderer,
    decoder: &KeyDecoder,
    clock: &mut SystemClock,
    settings: &Settings,
) -> Result<u64> {
    let mut session = GameSession::new(settings.level, SimpleRng::from_entropy());
    let mut frame_clock = FrameClock::for_level(settings.level, Instant::now());
    let view = GameView;

    while session.is_running() {
        // Input: at most one token per iteration, mapped through the
        // player's current bindings.
        if let Some(key) = decoder.poll_key(term.backend_mut(), clock) {
            session.apply_key(&key, &settings.bindings);
            if !session.is_running() {
                break;
            }
        }

        // Simulation: gated on wall-clock time, not on loop speed.
        let now = Instant::now();
        if frame_clock.should_advance(now) {
            session.tick();
            frame_clock.mark_advanced(now);
        }

        renderer.draw(&view.render(&session, &settings.bindings, viewport()))?;
        thread::sleep(Duration::from_millis(LOOP_YIELD_MS));
    }

    Ok(session.score)
}

/// Block until the next token, polling gently.
fn wait_key(term: &mut Term, decoder: &KeyDecoder, clock: &mut SystemClock) -> Key {
    loop {
        if let Some(key) = decoder.poll_key(term.backend_mut(), clock) {
            return key;
        }
        thread::sleep(Duration::from_millis(MENU_POLL_MS));
    }
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
