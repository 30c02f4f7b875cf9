use crate::agents::Difficulty;
use crate::config::TableConfig;
use crate::game::Game;

use super::{AppState, Scene};

/// Seats offered by the menu; the library allows more.
const MENU_MAX_PLAYERS: usize = 9;
const STACK_STEP: u64 = 100;
const DELAY_STEP_MS: u64 = 100;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    StartingStack,
    BotDifficulty,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 4] =
    [MenuItem::Players, MenuItem::StartingStack, MenuItem::BotDifficulty, MenuItem::BotDelayMs];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::StartingStack => format!("Starting Stack: ${}", app.cfg_starting_stack),
            MenuItem::BotDifficulty => {
                format!("Bot Difficulty: {}", AppState::difficulty_label(app.cfg_bot_difficulty))
            }
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn adjust(self, app: &mut AppState, up: bool) {
        match (self, up) {
            (MenuItem::Players, true) => {
                app.cfg_num_players = (app.cfg_num_players + 1).min(MENU_MAX_PLAYERS);
            }
            (MenuItem::Players, false) => {
                app.cfg_num_players = app.cfg_num_players.saturating_sub(1).max(2);
            }
            (MenuItem::StartingStack, true) => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_add(STACK_STEP);
            }
            (MenuItem::StartingStack, false) => {
                app.cfg_starting_stack =
                    app.cfg_starting_stack.saturating_sub(STACK_STEP).max(STACK_STEP);
            }
            (MenuItem::BotDifficulty, up) => {
                app.cfg_bot_difficulty = match (app.cfg_bot_difficulty, up) {
                    (Difficulty::Easy, true) | (Difficulty::Hard, false) => Difficulty::Medium,
                    (Difficulty::Medium, true) | (Difficulty::Easy, false) => Difficulty::Hard,
                    (Difficulty::Hard, true) | (Difficulty::Medium, false) => Difficulty::Easy,
                };
            }
            (MenuItem::BotDelayMs, true) => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(DELAY_STEP_MS);
            }
            (MenuItem::BotDelayMs, false) => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(DELAY_STEP_MS);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        match self.scene {
            Scene::Menu => {
                self.close_overlays();
                self.scene = Scene::Table;
            }
            Scene::Table => self.open_menu(),
        }
    }

    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        self.cfg_num_players = self.game.players().len();
        self.cfg_starting_stack =
            self.game.config().players.first().map(|s| s.stack).unwrap_or(self.cfg_starting_stack);
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_bot_difficulty = self.bot_difficulty;
        self.scene = Scene::Menu;
    }

    /// Start a fresh table from the edited settings. The shuffle seed carries over.
    pub fn apply_menu(&mut self) {
        let mut config = TableConfig::with_players(self.cfg_num_players, self.cfg_starting_stack);
        config.seed = self.game.config().seed;
        let game = match Game::new(config) {
            Ok(game) => game,
            Err(e) => {
                self.set_action_error(e.to_string());
                return;
            }
        };
        self.game = game;
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.bot_difficulty = self.cfg_bot_difficulty;
        self.difficulties = vec![self.bot_difficulty; self.cfg_num_players];
        self.seat_agents();
        self.focus = super::HUMAN_SEAT;
        self.hand_started = false;
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }

    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }

    pub fn menu_adjust(&mut self, up: bool) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.adjust(self, up);
    }
}
