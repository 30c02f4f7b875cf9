use crate::action::{Action, ActionResponse};
use crate::agents::{
    AgentKind, AgentTable, BotAgent, BotProfile, Difficulty, HumanAgent, TurnOutcome,
};
use crate::config::TableConfig;
use crate::game::{Game, GameError, HistoryEntry};
use std::time::{Duration, Instant};

mod menu;

/// The seat driven from the keyboard.
pub const HUMAN_SEAT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewHand,
    Check,
    Call,
    Fold,
    AllIn,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountInc,
    AmountDec,
    AmountSubmit,
    AmountCancel,
    BotDifficultyNext,
    FocusNext,
    FocusPrev,
    FocusSeat(usize),
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Game,
    // UI focus seat index (does not auto-move with action)
    pub focus: usize,
    pub agents: AgentTable,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_starting_stack: u64,
    pub cfg_bot_difficulty: Difficulty,
    pub cfg_bot_delay_ms: u64,
    pub bot_delay_ms: u64,
    pub bot_difficulty: Difficulty,
    pub hand_started: bool,
    pub(crate) difficulties: Vec<Difficulty>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    /// Chips added per `+`/`-` press in the raise dialog and the default raise size.
    pub const RAISE_STEP: u64 = 10;
    const DEFAULT_BOT_DELAY_MS: u64 = 500;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Seat `config` at a fresh table with the human at [`HUMAN_SEAT`] and bots on
    /// the other seats. Starts in the menu.
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        let game = Game::new(config)?;
        let n = game.players().len();
        let stack = game.config().players.first().map(|s| s.stack).unwrap_or_default();
        let difficulty = Difficulty::Medium;
        let mut app = Self {
            scene: Scene::Menu,
            game,
            focus: HUMAN_SEAT,
            agents: AgentTable::for_seats(n),
            menu_index: 0,
            cfg_num_players: n,
            cfg_starting_stack: stack,
            cfg_bot_difficulty: difficulty,
            cfg_bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            bot_difficulty: difficulty,
            hand_started: false,
            difficulties: vec![difficulty; n],
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            action_error: None,
            action_error_at: None,
        };
        app.seat_agents();
        Ok(app)
    }

    /// Rebuild the agent table: keyboard at the human seat, a bot everywhere else.
    pub(crate) fn seat_agents(&mut self) {
        let n = self.game.players().len();
        self.difficulties.resize(n, self.bot_difficulty);
        self.agents = AgentTable::for_seats(n);
        self.agents.set_min_action_delay_ms(self.bot_delay_ms);
        self.agents.set_agent(HUMAN_SEAT, Some(Box::new(HumanAgent::new())));
        for seat in (0..n).filter(|&s| s != HUMAN_SEAT) {
            let profile = self.bot_profile(seat);
            self.agents.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
        }
    }

    fn bot_profile(&self, seat: usize) -> BotProfile {
        let difficulty = self.difficulties.get(seat).copied().unwrap_or(self.bot_difficulty);
        let profile = BotProfile::for_difficulty(difficulty);
        match self.game.config().seed {
            Some(seed) => profile.with_seed(seed.wrapping_add(seat as u64)),
            None => profile,
        }
    }

    fn can_act_for_focus(&self) -> bool {
        if self.scene != Scene::Table || !self.hand_started {
            return false;
        }
        self.game.awaiting() == Some(self.focus)
            && matches!(self.agents.agent_kind(self.focus), Some(AgentKind::Human))
    }

    fn queue_action(&mut self, action: Action) -> bool {
        if !self.can_act_for_focus() {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(self.focus, action)
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Surface a rejected response in the status bar.
    pub fn report(&mut self, response: ActionResponse) {
        if response.accepted {
            self.clear_action_error();
        } else {
            self.set_action_error(response.reason.unwrap_or_else(|| "rejected".to_string()));
        }
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    /// The history window currently scrolled into view, oldest first.
    pub fn history_page(&self) -> &[HistoryEntry] {
        let all = self.game.history();
        let end = all.len().saturating_sub(self.history_offset);
        let start = end.saturating_sub(Self::HISTORY_PAGE_SIZE);
        &all[start..end]
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
    }

    pub fn bot_label(&self, seat: usize) -> Option<&'static str> {
        if !matches!(self.agents.agent_kind(seat), Some(AgentKind::Bot)) {
            return None;
        }
        let diff = self.difficulties.get(seat).copied().unwrap_or(self.bot_difficulty);
        Some(Self::difficulty_label(diff))
    }

    pub fn difficulty_label(difficulty: Difficulty) -> &'static str {
        match difficulty {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Med",
            Difficulty::Hard => "Hard",
        }
    }

    /// Smallest total bet a raise may name this round.
    pub fn min_raise(&self) -> u64 {
        self.game.round_bet()
    }

    /// Chips the focused seat can put in this round.
    pub fn max_raise(&self) -> u64 {
        self.game.player(self.focus).map(|p| p.stack()).unwrap_or(0)
    }

    fn open_amount_entry(&mut self) -> bool {
        if !self.can_act_for_focus() {
            return false;
        }
        self.amount_entry = Some((self.game.round_bet() + Self::RAISE_STEP).to_string());
        self.amount_entry_error = None;
        true
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() >= 12 || digit > 9 {
                return;
            }
            buf.push(char::from(b'0' + digit));
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_step(&mut self, up: bool) {
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<u64>().unwrap_or(0);
            let next =
                if up { cur.saturating_add(Self::RAISE_STEP) } else { cur.saturating_sub(Self::RAISE_STEP) };
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_ref() else {
            return false;
        };
        let Ok(amount) = buf.parse::<u64>() else {
            self.amount_entry_error = Some("Invalid amount".to_string());
            return false;
        };
        let (min, max) = (self.min_raise(), self.max_raise());
        if amount < min {
            self.amount_entry_error = Some(format!("Min bet is {min}"));
            return false;
        }
        if amount > max {
            self.amount_entry_error = Some(format!("Only {max} behind, use all in"));
            return false;
        }
        if self.queue_action(Action::Raise(amount)) {
            self.amount_entry = None;
            self.amount_entry_error = None;
            return true;
        }
        self.amount_entry_error = Some("Action not allowed".to_string());
        false
    }

    fn amount_entry_cancel(&mut self) {
        self.amount_entry = None;
        self.amount_entry_error = None;
    }

    /// Apply one input. Returns true when an action was queued for the human seat.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open {
                    self.history_offset = self.history_offset.saturating_sub(1);
                }
                false
            }
            InputAction::MenuNext | InputAction::MenuPrev if self.scene == Scene::Menu => {
                if action == InputAction::MenuNext {
                    self.menu_next();
                } else {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc | InputAction::MenuDec if self.scene == Scene::Menu => {
                self.menu_adjust(action == InputAction::MenuInc);
                false
            }
            InputAction::MenuApply if self.scene == Scene::Menu => {
                self.apply_menu();
                false
            }
            InputAction::MenuCancel if self.scene == Scene::Menu => {
                self.cancel_menu();
                false
            }
            InputAction::MenuNext
            | InputAction::MenuPrev
            | InputAction::MenuInc
            | InputAction::MenuDec
            | InputAction::MenuApply
            | InputAction::MenuCancel => false,
            InputAction::NewHand => {
                if self.scene == Scene::Table {
                    self.new_hand();
                }
                false
            }
            InputAction::Check => self.queue_action(Action::Check),
            InputAction::Call => self.queue_action(Action::Call),
            InputAction::Fold => self.queue_action(Action::Fold),
            InputAction::AllIn => self.queue_action(Action::AllIn),
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                self.amount_entry_backspace();
                false
            }
            InputAction::AmountInc | InputAction::AmountDec => {
                self.amount_entry_step(action == InputAction::AmountInc);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry_cancel();
                false
            }
            InputAction::BotDifficultyNext => {
                if self.scene == Scene::Table {
                    self.cycle_focus_bot_difficulty();
                }
                false
            }
            InputAction::FocusNext => {
                if self.scene == Scene::Table {
                    self.focus_next();
                }
                false
            }
            InputAction::FocusPrev => {
                if self.scene == Scene::Table {
                    self.focus_prev();
                }
                false
            }
            InputAction::FocusSeat(idx) => {
                if self.scene == Scene::Table {
                    self.set_focus(idx);
                }
                false
            }
        }
    }

    /// Deal the next hand once the previous one is over.
    pub fn new_hand(&mut self) {
        if self.hand_started && !self.game.is_hand_over() {
            return;
        }
        match self.game.new_hand() {
            Ok(()) => {
                self.hand_started = true;
                self.history_offset = 0;
                self.amount_entry = None;
                self.clear_action_error();
            }
            Err(e) => self.set_action_error(e.to_string()),
        }
    }

    pub fn focus_next(&mut self) {
        let n = self.game.players().len();
        if n == 0 {
            return;
        }
        self.focus = (self.focus + 1) % n;
    }

    pub fn focus_prev(&mut self) {
        let n = self.game.players().len();
        if n == 0 {
            return;
        }
        self.focus = (self.focus + n - 1) % n;
    }

    pub fn set_focus(&mut self, idx: usize) {
        let n = self.game.players().len();
        if n == 0 {
            return;
        }
        self.focus = idx % n;
    }

    pub fn cycle_focus_bot_difficulty(&mut self) {
        if !matches!(self.agents.agent_kind(self.focus), Some(AgentKind::Bot)) {
            return;
        }
        let Some(slot) = self.difficulties.get_mut(self.focus) else {
            return;
        };
        *slot = match *slot {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        };
        let profile = self.bot_profile(self.focus);
        self.agents.set_agent(self.focus, Some(Box::new(BotAgent::new(profile))));
    }

    /// Let the agent at the awaiting seat act, if it is ready. Called every tick.
    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.hand_started {
            return;
        }
        if self.action_error_at.is_some_and(|at| at.elapsed() >= Self::ACTION_ERROR_TTL) {
            self.clear_action_error();
        }
        match self.agents.on_turn(&mut self.game) {
            Ok(TurnOutcome::Acted { seat, .. }) if seat == HUMAN_SEAT => self.clear_action_error(),
            Ok(TurnOutcome::Rejected { reason, .. }) => self.report(ActionResponse::rejected(reason)),
            Ok(TurnOutcome::ForcedFold { seat, .. }) => {
                let name = self.game.player(seat).map(|p| p.name().to_string()).unwrap_or_default();
                self.set_action_error(format!("{name} folded after repeated invalid actions"));
            }
            Ok(_) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_app() -> AppState {
        let mut app = AppState::new(TableConfig::with_players(3, 500).with_seed(5)).unwrap();
        app.cfg_bot_delay_ms = 0;
        app.apply_menu();
        app
    }

    #[test]
    fn action_ignored_before_turn() {
        let mut app = table_app();
        app.new_hand();
        // first to act sits left of the dealer, so the human waits
        assert_ne!(app.game.awaiting(), Some(HUMAN_SEAT));
        assert!(!app.handle_input(InputAction::Fold));
        assert!(app.game.player(HUMAN_SEAT).unwrap().last_action().is_none());
    }

    #[test]
    fn raise_limits_checked_before_queueing() {
        let mut app = table_app();
        app.new_hand();
        while app.game.awaiting().is_some_and(|s| s != HUMAN_SEAT) {
            app.agents_on_turn();
        }
        assert_eq!(app.game.awaiting(), Some(HUMAN_SEAT));
        assert!(app.handle_input(InputAction::AmountOpen));
        app.amount_entry = Some("9999".into());
        assert!(!app.handle_input(InputAction::AmountSubmit));
        assert_eq!(app.amount_entry_error(), Some("Only 500 behind, use all in"));
        app.amount_entry = Some((app.min_raise() + 40).to_string());
        assert!(app.handle_input(InputAction::AmountSubmit));
        assert!(!app.amount_entry_active());
        app.agents_on_turn();
        assert!(app.game.player(HUMAN_SEAT).unwrap().last_action().unwrap().starts_with("Raise"));
    }

    #[test]
    fn rejections_show_in_status() {
        let mut app = table_app();
        app.report(ActionResponse::rejected("bet must meet or exceed the current bet of 20, got 5"));
        assert!(app.action_error().unwrap().contains("current bet of 20"));
        app.report(ActionResponse::accepted());
        assert_eq!(app.action_error(), None);
    }

    #[test]
    fn difficulty_cycles_only_for_bots() {
        let mut app = table_app();
        app.focus = HUMAN_SEAT;
        app.cycle_focus_bot_difficulty();
        assert_eq!(app.bot_label(HUMAN_SEAT), None);
        app.focus = 1;
        assert_eq!(app.bot_label(1), Some("Med"));
        app.cycle_focus_bot_difficulty();
        assert_eq!(app.bot_label(1), Some("Hard"));
        app.cycle_focus_bot_difficulty();
        assert_eq!(app.bot_label(1), Some("Easy"));
    }
}
