use crossterm::event::KeyCode;
use holdem_rs::config::TableConfig;
use holdem_rs::tui::app::{AppState, InputAction, Scene, HUMAN_SEAT};
use holdem_rs::tui::controller;

fn setup_table_app() -> AppState {
    let mut app = AppState::new(TableConfig::default()).unwrap();
    app.cfg_bot_delay_ms = 0;
    app.apply_menu();
    app
}

/// Let the bots play until the human seat is up.
fn wait_for_human(app: &mut AppState) {
    for _ in 0..100 {
        if app.game.awaiting() != Some(HUMAN_SEAT) {
            app.agents_on_turn();
        }
    }
    assert_eq!(app.game.awaiting(), Some(HUMAN_SEAT));
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::new(TableConfig::default()).unwrap();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuInc);
    assert_eq!(app.cfg_num_players, 4);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game.players().len(), 4);
}

#[test]
fn menu_clamps_player_count() {
    let mut app = AppState::new(TableConfig::with_players(2, 100)).unwrap();
    let _ = app.handle_input(InputAction::MenuDec);
    assert_eq!(app.cfg_num_players, 2);
    for _ in 0..20 {
        let _ = app.handle_input(InputAction::MenuInc);
    }
    assert_eq!(app.cfg_num_players, 9);
    assert!(app.menu_items_display()[0].contains('9'));
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn amount_entry_edit_and_cancel() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::NewHand);
    wait_for_human(&mut app);

    let expected = (app.game.round_bet() + AppState::RAISE_STEP).to_string();
    assert!(app.handle_input(InputAction::AmountOpen));
    assert!(app.amount_entry_active());
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountDigit(5));
    let appended = format!("{expected}5");
    assert_eq!(app.amount_entry_text(), Some(appended.as_str()));

    let _ = app.handle_input(InputAction::AmountBackspace);
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountCancel);
    assert!(!app.amount_entry_active());
}

#[test]
fn focus_wraps_across_seats() {
    let mut app = setup_table_app();
    let n = app.game.players().len();
    assert!(n >= 2);
    app.focus = n - 1;
    let _ = app.handle_input(InputAction::FocusNext);
    assert_eq!(app.focus, 0);
    let _ = app.handle_input(InputAction::FocusPrev);
    assert_eq!(app.focus, n - 1);
}

#[test]
fn keys_drive_the_table() {
    let mut app = setup_table_app();
    assert!(!controller::handle_key(&mut app, KeyCode::Char(' ')));
    assert!(app.hand_started);
    wait_for_human(&mut app);

    let to_call = app.game.round_bet();
    let key = if to_call == 0 { 'k' } else { 'c' };
    assert!(!controller::handle_key(&mut app, KeyCode::Char(key)));
    assert!(app.game.player(HUMAN_SEAT).unwrap().last_action().is_some());

    assert!(!controller::handle_key(&mut app, KeyCode::Char('?')));
    assert!(app.help_open());
    // keys other than Esc are swallowed while help is open
    assert!(!controller::handle_key(&mut app, KeyCode::Char('q')));
    assert!(!controller::handle_key(&mut app, KeyCode::Esc));
    assert!(!app.help_open());
    assert!(controller::handle_key(&mut app, KeyCode::Char('q')));
}
