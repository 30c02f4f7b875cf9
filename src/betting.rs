//! Betting-round state machine.
//!
//! [`BettingState`] tracks whose turn it is, validates each [`Action`], decides when a
//! round of betting is complete and commits bets to the pot. It knows nothing about
//! cards; the orchestrator in [`crate::game`] deals streets when a round completes.
//!
//! Chips move only when a round closes: a player's `bet` is the amount they have put
//! forward this round, and it is debited from their stack at commit time.

use crate::action::{Action, ActionError};
use crate::hand::HoleCards;

/// Round counter value at which betting stops and the river is dealt.
pub const FINAL_ROUND: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Map the round counter (0 preflop, 1 flop, 2 turn, 3 river).
    pub fn from_round(round: u8) -> Self {
        match round {
            0 => Street::Preflop,
            1 => Street::Flop,
            2 => Street::Turn,
            _ => Street::River,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

/// How a betting round was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Bets matched the level (or players were all in); bets go to the pot.
    Matched,
    /// Every player with a decision left checked; only all-in bets are committed.
    Checked,
}

/// What happened after an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Betting continues with this seat.
    Next(usize),
    /// The round closed and the next street starts.
    RoundComplete { ended: RoundEnd, street: Street },
    /// Betting is over for this hand.
    HandOver { ended: RoundEnd },
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) bet: u64,
    pub(crate) folded: bool,
    pub(crate) all_in: bool,
    pub(crate) checked: bool,
    pub(crate) acted: bool,
    pub(crate) bets: Vec<u64>,
    pub(crate) last_action: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u64) -> Self {
        Self {
            name: name.into(),
            stack,
            hole: None,
            bet: 0,
            folded: false,
            all_in: false,
            checked: false,
            acted: false,
            bets: Vec::new(),
            last_action: None,
        }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chip stack, not counting the uncommitted bet of the current round
    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Chips left once the current bet is committed
    pub fn behind(&self) -> u64 {
        self.stack.saturating_sub(self.bet)
    }

    /// Returns the player's bet in the current round
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    pub fn has_checked(&self) -> bool {
        self.checked
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }

    /// Amount committed at the end of each completed round of the current hand.
    pub fn bets(&self) -> &[u64] {
        &self.bets
    }

    /// Total committed this hand.
    pub fn committed(&self) -> u64 {
        self.bets.iter().sum()
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    /// Still has decisions to make: neither folded nor all in.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    fn reset_round(&mut self) {
        self.bet = 0;
        self.checked = false;
        self.acted = false;
    }

    pub(crate) fn reset_hand(&mut self) {
        self.reset_round();
        self.hole = None;
        self.all_in = false;
        self.bets.clear();
        self.last_action = None;
        // busted players sit the hand out
        self.folded = self.stack == 0;
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BettingState {
    pub(crate) players: Vec<Player>,
    pub(crate) current: usize,
    pub(crate) round_bet: u64,
    pub(crate) pot: u64,
    pub(crate) round: u8,
    pub(crate) game_over: bool,
    pub(crate) dealer: usize,
    /// Round bet of the last seat to act, taken before any commit.
    pub(crate) last_bet: u64,
}

impl BettingState {
    /// Start a hand with the given players; the first seat after the dealer acts first.
    pub fn new(players: Vec<Player>, dealer: usize) -> Self {
        let mut state = Self {
            players,
            current: 0,
            round_bet: 0,
            pot: 0,
            round: 0,
            game_over: false,
            dealer,
            last_bet: 0,
        };
        state.start_hand(dealer);
        state
    }

    /// Reset per-hand state. Players without chips are folded for the hand.
    pub(crate) fn start_hand(&mut self, dealer: usize) {
        for p in &mut self.players {
            p.reset_hand();
        }
        self.dealer = dealer;
        self.round_bet = 0;
        self.pot = 0;
        self.round = 0;
        self.last_bet = 0;
        self.game_over = self.count_can_act() < 2;
        self.current = self.first_to_act();
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// Round bet level
    pub fn round_bet(&self) -> u64 {
        self.round_bet
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn street(&self) -> Street {
        Street::from_round(self.round)
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Seats that have folded this hand, in table order.
    pub fn folded(&self) -> Vec<usize> {
        self.players.iter().enumerate().filter(|(_, p)| p.folded).map(|(i, _)| i).collect()
    }

    /// Seat whose decision is awaited, or `None` once betting is over.
    pub fn awaiting(&self) -> Option<usize> {
        if self.game_over {
            return None;
        }
        self.players.get(self.current).filter(|p| p.can_act()).map(|_| self.current)
    }

    /// Apply `action` for the awaiting seat. On error nothing changes.
    pub fn act(&mut self, action: Action) -> Result<Step, ActionError> {
        if self.game_over {
            return Err(ActionError::HandOver);
        }
        let seat = self.awaiting().ok_or(ActionError::NoActor)?;
        self.validate(seat, action)?;
        self.apply(seat, action);
        self.last_bet = self.players[seat].bet;
        log::debug!(
            "{} {} (bet {}, level {})",
            self.players[seat].name,
            action,
            self.players[seat].bet,
            self.round_bet
        );

        if let Some(ended) = self.round_complete() {
            return Ok(self.close_round(ended));
        }
        self.current = self.next_to_act(seat);
        Ok(Step::Next(self.current))
    }

    fn validate(&self, seat: usize, action: Action) -> Result<(), ActionError> {
        let p = &self.players[seat];
        match action {
            Action::Call if p.stack < self.round_bet => {
                Err(ActionError::InsufficientFunds { need: self.round_bet, stack: p.stack })
            }
            Action::Raise(amount) if amount < self.round_bet => {
                Err(ActionError::BelowCurrentBet { current: self.round_bet, got: amount })
            }
            Action::Raise(amount) if p.stack < amount => {
                Err(ActionError::InsufficientFunds { need: amount, stack: p.stack })
            }
            _ => Ok(()),
        }
    }

    fn apply(&mut self, seat: usize, action: Action) {
        let level = self.round_bet;
        let p = &mut self.players[seat];
        p.acted = true;
        p.checked = false;
        match action {
            Action::Check => {
                p.checked = true;
                p.last_action = Some("Check".into());
            }
            Action::Call => {
                p.bet = level;
                p.last_action = Some(format!("Call {level}"));
            }
            Action::Raise(amount) => {
                p.bet = amount;
                p.last_action = Some(format!("Raise {amount}"));
            }
            Action::Fold => {
                p.folded = true;
                p.last_action = Some("Fold".into());
            }
            Action::AllIn => {
                p.bet = p.stack;
                p.all_in = true;
                p.last_action = Some(format!("All in {}", p.stack));
            }
        }
        if p.stack > 0 && p.bet == p.stack {
            p.all_in = true;
        }
        let new_level = p.bet;
        if new_level > level {
            self.round_bet = new_level;
            // everyone else must answer the new level
            for (i, other) in self.players.iter_mut().enumerate() {
                if i != seat {
                    other.acted = false;
                    other.checked = false;
                }
            }
        }
    }

    /// Pure completion check over the non-folded players. Calling it twice in a row
    /// gives the same answer.
    ///
    /// Nobody who can still act may be pending; then the round is over when
    /// (a) every bet equals the level, (b) every player who can still act checked, or
    /// (c) every player is all in or matches the level. All-in players get no turn, so
    /// they never count against (b).
    pub fn round_complete(&self) -> Option<RoundEnd> {
        let live: Vec<&Player> = self.players.iter().filter(|p| !p.folded).collect();
        if live.len() <= 1 {
            return Some(RoundEnd::Matched);
        }
        if live.iter().any(|p| p.can_act() && !p.acted) {
            return None;
        }
        if live.iter().all(|p| p.bet == self.round_bet) {
            return Some(RoundEnd::Matched);
        }
        let mut actors = live.iter().filter(|p| p.can_act()).peekable();
        if actors.peek().is_some() && actors.all(|p| p.checked) {
            return Some(RoundEnd::Checked);
        }
        if live.iter().all(|p| p.all_in || p.bet == self.round_bet) {
            return Some(RoundEnd::Matched);
        }
        None
    }

    fn close_round(&mut self, ended: RoundEnd) -> Step {
        self.commit(ended);
        let live = self.players.iter().filter(|p| !p.folded).count();
        let street = self.street();

        if live <= 1 || self.count_can_act() < 2 {
            if self.round < FINAL_ROUND {
                log::info!("betting closed on the {}; running out the board", street.label());
            }
            self.round = FINAL_ROUND;
            self.game_over = true;
            return Step::HandOver { ended };
        }

        self.round += 1;
        if self.round >= FINAL_ROUND {
            self.game_over = true;
            return Step::HandOver { ended };
        }
        self.current = self.first_to_act();
        log::info!("{} betting starts, pot {}", self.street().label(), self.pot);
        Step::RoundComplete { ended, street: self.street() }
    }

    /// Move current bets into the pot and reset per-round flags.
    fn commit(&mut self, ended: RoundEnd) {
        let mut total = 0;
        for p in &mut self.players {
            // an all-in bet is in the pot however the round ended
            let amount = match ended {
                RoundEnd::Checked if !p.all_in => 0,
                _ => p.bet,
            };
            p.stack -= amount;
            total += amount;
            p.bets.push(amount);
            p.reset_round();
        }
        self.pot += total;
        self.round_bet = 0;
        log::debug!("round committed {total}, pot {}", self.pot);
    }

    fn count_can_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    fn first_to_act(&self) -> usize {
        if self.players.is_empty() {
            return 0;
        }
        self.next_to_act(self.dealer)
    }

    /// Next seat after `start` in table order, skipping folded and all-in players.
    fn next_to_act(&self, start: usize) -> usize {
        let n = self.players.len();
        if n == 0 {
            return 0;
        }
        let mut i = (start + 1) % n;
        for _ in 0..n {
            if self.players[i].can_act() {
                return i;
            }
            i = (i + 1) % n;
        }
        start % n
    }
}
