//! Menu flows: level selection feeds the frame clock, and rebinding
//! captures arbitrary tokens that gameplay then honors.

use std::time::Instant;

use tui_racer::core::{FrameClock, GameSession, SimpleRng};
use tui_racer::term::Viewport;
use tui_racer::types::{Bindings, Key, Settings};
use tui_racer::ui::{
    self, apply_level_choice, choice_for_key, render_menu, MenuChoice,
};

#[test]
fn level_choice_changes_simulation_speed() {
    let mut settings = Settings::default();
    let now = Instant::now();
    let slow = FrameClock::for_level(settings.level, now).interval();

    assert!(apply_level_choice(&mut settings, &Key::Char('5')));
    let fast = FrameClock::for_level(settings.level, now).interval();
    assert!(fast < slow);
}

#[test]
fn out_of_range_level_keys_are_rejected() {
    let mut settings = Settings::default();
    for key in [Key::Char('0'), Key::Char('6'), Key::Char('9'), Key::Up] {
        assert!(!apply_level_choice(&mut settings, &key));
    }
    assert_eq!(settings.level, Settings::default().level);
}

#[test]
fn rebinding_to_arrows_moves_the_player() {
    let mut settings = Settings::default();
    // The controls menu assigns whatever tokens were captured.
    settings.bindings = Bindings {
        left: Key::Left,
        right: Key::Right,
    };

    let mut session = GameSession::new(settings.level, SimpleRng::new(4));
    let start = session.player_col;
    session.apply_key(&Key::Left, &settings.bindings);
    session.apply_key(&Key::Left, &settings.bindings);
    session.apply_key(&Key::Right, &settings.bindings);
    assert_eq!(session.player_col, start - 1);
}

#[test]
fn menu_screen_reflects_rebound_controls() {
    let mut settings = Settings::default();
    settings.bindings.left = Key::Other(vec![0x1b, b'O', b'D']);
    let fb = render_menu(&settings, 0, Viewport::new(80, 24));
    let all: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();
    assert!(all.contains("Left: 'SEQ(0x1B 0x4F 0x44)'"));
}

#[test]
fn every_menu_entry_is_reachable_by_a_digit() {
    let expected = [
        ('1', MenuChoice::NewGame),
        ('2', MenuChoice::SelectLevel),
        ('3', MenuChoice::Controls),
        ('4', MenuChoice::HighScore),
        ('5', MenuChoice::Exit),
    ];
    for (digit, choice) in expected {
        assert_eq!(choice_for_key(&Key::Char(digit)), Some(choice));
    }
}

#[test]
fn game_over_screen_renders_for_any_scores() {
    let fb = ui::render_game_over(0, 0, Viewport::new(40, 12));
    let all: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();
    assert!(all.contains("GAME OVER"));
}
