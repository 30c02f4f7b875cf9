use crate::action::{Action, ActionError, ActionResponse};
use crate::betting::{BettingState, Player, RoundEnd, Step, Street};
use crate::config::{ConfigError, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_holdem, EvalError, Evaluation};
use crate::hand::{CommunityCards, HandError};
use log::{debug, info};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
    #[error("need at least 2 players with chips, got {0}")]
    NotEnoughPlayers(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShowdownError {
    #[error("the hand is not finished")]
    NotFinished,
    #[error("player {0} has no hole cards")]
    MissingHole(usize),
    #[error("hand evaluation failed: {0}")]
    Evaluation(String),
}

impl From<EvalError> for ShowdownError {
    fn from(e: EvalError) -> Self {
        ShowdownError::Evaluation(e.to_string())
    }
}

/// One accepted action of the current hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub seat: usize,
    pub street: Street,
    pub action: Action,
    /// The player's bet for the round right after acting.
    pub bet: u64,
}

/// Evaluation of one player still in the hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SeatResult {
    pub seat: usize,
    pub name: String,
    pub evaluation: Evaluation,
}

impl SeatResult {
    pub fn label(&self) -> &'static str {
        self.evaluation.label()
    }
}

/// Outcome of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Showdown {
    /// Final pot amount.
    pub pot: u64,
    /// Non-folded players in seat order.
    pub results: Vec<SeatResult>,
    /// Winning seats in seat order.
    pub winners: Vec<usize>,
    /// Chips paid to each winner, parallel to `winners`.
    pub payouts: Vec<u64>,
    /// Everyone else folded.
    pub uncontested: bool,
}

/// A single table: owns the deck, the board and the betting state.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: TableConfig,
    pub(crate) deck: Deck,
    pub(crate) board: CommunityCards,
    pub(crate) betting: BettingState,
    pub(crate) showdown: Option<Showdown>,
    hand_history: Vec<HistoryEntry>,
    hands_played: u64,
}

impl Game {
    /// Seat the configured players. No cards are dealt until [`Game::new_hand`].
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        config.validate()?;
        let players = config.players.iter().map(|s| Player::new(s.name.clone(), s.stack)).collect();
        let mut betting = BettingState::new(players, 0);
        betting.game_over = true;
        Ok(Self {
            config,
            deck: Deck::standard(),
            board: CommunityCards::new(),
            betting,
            showdown: None,
            hand_history: Vec::new(),
            hands_played: 0,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns a reference to the players
    pub fn players(&self) -> &[Player] {
        self.betting.players()
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.betting.player(seat)
    }

    pub fn board(&self) -> &CommunityCards {
        &self.board
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    /// Returns the current pot size
    pub fn pot(&self) -> u64 {
        self.betting.pot()
    }

    pub fn round_bet(&self) -> u64 {
        self.betting.round_bet()
    }

    /// Round counter: 0 preflop, 1 flop, 2 turn, 3 river.
    pub fn round(&self) -> u8 {
        self.betting.round()
    }

    pub fn street(&self) -> Street {
        self.betting.street()
    }

    pub fn dealer(&self) -> usize {
        self.betting.dealer()
    }

    pub fn awaiting(&self) -> Option<usize> {
        self.betting.awaiting()
    }

    pub fn is_hand_over(&self) -> bool {
        self.betting.is_over()
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining_count()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.hand_history
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        let start = self.hand_history.len().saturating_sub(n);
        self.hand_history[start..].to_vec()
    }

    /// Result of the last finished hand.
    pub fn showdown(&self) -> Result<&Showdown, ShowdownError> {
        self.showdown.as_ref().ok_or(ShowdownError::NotFinished)
    }

    /// Shuffle a fresh deck and deal the next hand. With a configured seed, hand `k`
    /// uses `seed + k` so whole sessions replay exactly.
    pub fn new_hand(&mut self) -> Result<(), GameError> {
        let mut deck = Deck::standard();
        match self.config.seed {
            Some(seed) => deck.shuffle_seeded(seed.wrapping_add(self.hands_played)),
            None => deck.shuffle(),
        }
        self.new_hand_with_deck(deck)
    }

    /// Deal the next hand from `deck` as it is (no shuffle).
    pub fn new_hand_with_deck(&mut self, deck: Deck) -> Result<(), GameError> {
        let seated: Vec<usize> = self
            .betting
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.stack > 0)
            .map(|(i, _)| i)
            .collect();
        if seated.len() < 2 {
            return Err(GameError::NotEnoughPlayers(seated.len()));
        }
        let needed = seated.len() * 2 + 5;
        if deck.remaining_count() < needed {
            return Err(DeckError::Exhausted { requested: needed, remaining: deck.remaining_count() }
                .into());
        }

        let dealer = if self.hands_played == 0 {
            seated[0]
        } else {
            let n = self.betting.players.len();
            let prev = self.betting.dealer;
            (1..=n).map(|k| (prev + k) % n).find(|i| seated.contains(i)).unwrap_or(prev)
        };

        self.deck = deck;
        self.board.clear();
        self.showdown = None;
        self.hand_history.clear();
        self.betting.start_hand(dealer);

        let holes = self.deck.deal_hole(seated.len())?;
        for (&seat, hole) in seated.iter().zip(holes) {
            self.betting.players[seat].hole = Some(hole);
        }
        self.hands_played += 1;
        info!(
            "hand #{} dealer {} with {} players",
            self.hands_played,
            self.betting.players[dealer].name,
            seated.len()
        );
        Ok(())
    }

    /// Apply an action for the awaiting seat and move the hand forward: deal the next
    /// street when a round closes, run out the board and settle when betting is over.
    pub fn act(&mut self, action: Action) -> Result<Step, GameError> {
        let seat = self.betting.awaiting();
        let street = self.betting.street();
        let step = self.betting.act(action)?;
        if let Some(seat) = seat {
            let bet = self.betting.last_bet;
            self.hand_history.push(HistoryEntry { seat, street, action, bet });
        }

        match step {
            Step::Next(_) => {}
            Step::RoundComplete { street: Street::Flop, .. } => {
                let flop = self.deck.deal_flop()?;
                self.board.reveal_flop(flop)?;
            }
            Step::RoundComplete { street: Street::Turn, .. } => {
                let turn = self.deck.deal_turn()?;
                self.board.reveal_turn(turn)?;
            }
            Step::RoundComplete { .. } => self.run_out_board()?,
            Step::HandOver { ended } => {
                if ended == RoundEnd::Checked {
                    debug!("final round checked through");
                }
                self.run_out_board()?;
                self.settle()?;
            }
        }
        Ok(step)
    }

    /// Front-end wrapper around [`Game::act`]: rejected actions carry the reason and
    /// leave the same seat awaiting action.
    pub fn submit(&mut self, action: Action) -> ActionResponse {
        match self.act(action) {
            Ok(_) => ActionResponse::accepted(),
            Err(e) => {
                debug!("rejected {action}: {e}");
                ActionResponse::rejected(e)
            }
        }
    }

    fn run_out_board(&mut self) -> Result<(), GameError> {
        if self.board.is_empty() {
            let flop = self.deck.deal_flop()?;
            self.board.reveal_flop(flop)?;
        }
        if self.board.len() == 3 {
            let turn = self.deck.deal_turn()?;
            self.board.reveal_turn(turn)?;
        }
        if self.board.len() == 4 {
            let river = self.deck.deal_river()?;
            self.board.reveal_river(river)?;
        }
        Ok(())
    }

    /// Evaluate every non-folded player and pay the pot to the best hand. Exact ties
    /// split the pot; odd chips go to the earliest seats.
    fn settle(&mut self) -> Result<(), ShowdownError> {
        let pot = self.betting.pot;
        let mut results = Vec::new();
        for (seat, p) in self.betting.players.iter().enumerate().filter(|(_, p)| !p.folded) {
            let hole = p.hole.ok_or(ShowdownError::MissingHole(seat))?;
            let evaluation = evaluate_holdem(&hole, &self.board)?;
            results.push(SeatResult { seat, name: p.name.clone(), evaluation });
        }
        let best = results.iter().map(|r| r.evaluation).max().ok_or(ShowdownError::NotFinished)?;
        let winners: Vec<usize> =
            results.iter().filter(|r| r.evaluation == best).map(|r| r.seat).collect();

        let share = pot / winners.len() as u64;
        let mut odd = pot % winners.len() as u64;
        let mut payouts = Vec::with_capacity(winners.len());
        for &seat in &winners {
            let mut amount = share;
            if odd > 0 {
                amount += 1;
                odd -= 1;
            }
            let p = &mut self.betting.players[seat];
            p.stack += amount;
            p.last_action = Some(if winners.len() > 1 {
                format!("Split {amount}")
            } else {
                format!("Win {amount}")
            });
            payouts.push(amount);
        }

        for r in &results {
            debug!("{} shows {}", r.name, r.label());
        }
        let names: Vec<&str> =
            winners.iter().map(|&s| self.betting.players[s].name.as_str()).collect();
        info!("{} won {pot} with {}", names.join(", "), best.label());

        self.showdown = Some(Showdown {
            pot,
            uncontested: results.len() == 1,
            results,
            winners,
            payouts,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::Category;

    fn mk_game(n: usize) -> Game {
        Game::new(TableConfig::with_players(n, 1000)).unwrap()
    }

    fn stacked(s: &str) -> Deck {
        let mut cards = parse_cards(s).unwrap();
        // pad with the rest of a standard deck
        for c in Deck::standard().remaining().iter().rev() {
            if !cards.contains(c) {
                cards.push(*c);
            }
        }
        Deck::stacked(cards).unwrap()
    }

    #[test]
    fn new_game_waits_for_a_hand() {
        let g = mk_game(3);
        assert_eq!(g.awaiting(), None);
        assert!(matches!(g.showdown(), Err(ShowdownError::NotFinished)));
    }

    #[test]
    fn deal_gives_two_cards_each() {
        let mut g = mk_game(4);
        g.new_hand().unwrap();
        assert!(g.players().iter().all(|p| p.hole().is_some()));
        assert_eq!(g.deck_remaining(), 52 - 8);
        assert_eq!(g.awaiting(), Some(1));
        assert!(g.board().is_empty());
    }

    #[test]
    fn trips_on_paired_board_wins_showdown() {
        let mut g = mk_game(2);
        // P1: 2h 7c, P2: As Kc, board 2d 2c 9s | Kd | 4h
        g.new_hand_with_deck(stacked("2h 7c As Kc 2d 2c 9s Kd 4h")).unwrap();
        assert_eq!(g.awaiting(), Some(1));
        g.act(Action::Raise(50)).unwrap();
        let step = g.act(Action::Call).unwrap();
        assert!(matches!(step, Step::RoundComplete { street: Street::Flop, .. }));
        assert_eq!(g.board().len(), 3);
        assert_eq!(g.pot(), 100);
        for _ in 0..2 {
            g.act(Action::Check).unwrap();
            g.act(Action::Check).unwrap();
        }
        assert!(g.is_hand_over());
        assert!(g.board().is_complete());

        let sd = g.showdown().unwrap();
        assert_eq!(sd.pot, 100);
        assert_eq!(sd.winners, vec![0]);
        assert_eq!(sd.results[0].evaluation.category, Category::ThreeOfAKind);
        assert_eq!(sd.results[0].label(), "Three of a kind");
        assert_eq!(sd.results[1].label(), "Two pair");
        assert_eq!(g.players()[0].stack(), 1050);
        assert_eq!(g.players()[1].stack(), 950);
    }

    #[test]
    fn tie_splits_pot() {
        let mut g = Game::new(
            TableConfig::with_players(0, 0)
                .with_player("A", 101)
                .with_player("B", 100)
                .with_player("C", 100),
        )
        .unwrap();
        // board straight plays for everyone still in
        g.new_hand_with_deck(stacked("2c 3d 2h 3s 4c 4d 9s Ts Jh Qd Kc")).unwrap();
        g.act(Action::AllIn).unwrap();
        g.act(Action::Call).unwrap();
        g.act(Action::Fold).unwrap();
        let sd = g.showdown().unwrap();
        assert_eq!(sd.pot, 200);
        assert_eq!(sd.winners, vec![1, 2]);
        assert_eq!(sd.payouts, vec![100, 100]);
    }

    #[test]
    fn odd_chip_goes_to_earliest_seat() {
        let mut g = mk_game(3);
        g.new_hand_with_deck(stacked("2c 3d 2h 3s 4c 4d 9s Ts Jh Qd Kc")).unwrap();
        g.act(Action::Raise(1)).unwrap();
        g.act(Action::Call).unwrap();
        g.act(Action::Call).unwrap();
        assert_eq!(g.pot(), 3);
        g.act(Action::Raise(2)).unwrap();
        g.act(Action::Call).unwrap();
        g.act(Action::Fold).unwrap();
        assert_eq!(g.pot(), 7);
        g.act(Action::Check).unwrap();
        g.act(Action::Check).unwrap();
        let sd = g.showdown().unwrap();
        assert_eq!(sd.pot, 7);
        assert_eq!(sd.winners, vec![1, 2]);
        assert_eq!(sd.payouts, vec![4, 3]);
        let stacks: Vec<u64> = g.players().iter().map(|p| p.stack()).collect();
        assert_eq!(stacks, vec![999, 1001, 1000]);
    }

    #[test]
    fn folded_bets_stay_in_pot() {
        let mut g = mk_game(3);
        g.new_hand().unwrap();
        g.act(Action::Raise(10)).unwrap();
        g.act(Action::Raise(20)).unwrap();
        g.act(Action::Fold).unwrap();
        g.act(Action::Fold).unwrap();
        let sd = g.showdown().unwrap();
        assert_eq!(sd.pot, 30);
        assert_eq!(sd.winners, vec![2]);
        assert_eq!(g.players()[1].stack(), 990);
        assert_eq!(g.players()[2].stack(), 1010);
    }

    #[test]
    fn uncontested_pot_goes_to_last_player() {
        let mut g = mk_game(3);
        g.new_hand().unwrap();
        g.act(Action::Raise(40)).unwrap();
        g.act(Action::Fold).unwrap();
        let step = g.act(Action::Fold).unwrap();
        assert!(matches!(step, Step::HandOver { .. }));
        let sd = g.showdown().unwrap();
        assert!(sd.uncontested);
        assert_eq!(sd.winners, vec![1]);
        assert_eq!(g.players()[1].stack(), 1000);
        assert!(g.board().is_complete());
    }

    #[test]
    fn submit_reports_rejections() {
        let mut g = mk_game(3);
        g.new_hand().unwrap();
        g.act(Action::Raise(100)).unwrap();
        let resp = g.submit(Action::Raise(10));
        assert!(!resp.accepted);
        assert!(resp.reason.unwrap().contains("meet or exceed"));
        assert_eq!(g.awaiting(), Some(2));
        assert_eq!(g.history().len(), 1);
        assert!(g.submit(Action::Call).accepted);
    }

    #[test]
    fn all_in_preflop_runs_out_board() {
        let mut g = mk_game(2);
        g.new_hand().unwrap();
        g.act(Action::AllIn).unwrap();
        let step = g.act(Action::AllIn).unwrap();
        assert!(matches!(step, Step::HandOver { .. }));
        assert_eq!(g.round(), 3);
        assert!(g.board().is_complete());
        assert_eq!(g.awaiting(), None);
        let total: u64 = g.players().iter().map(|p| p.stack()).sum();
        assert_eq!(total, 2000);
    }

    #[test]
    fn dealer_rotates_and_busted_players_sit_out() {
        let mut g = mk_game(3);
        g.new_hand().unwrap();
        assert_eq!(g.dealer(), 0);
        while g.awaiting().is_some() {
            g.act(Action::Check).unwrap();
        }
        g.betting.players[2].stack = 0;
        g.new_hand().unwrap();
        assert_eq!(g.dealer(), 1);
        assert!(g.players()[2].is_folded());
        assert!(g.players()[2].hole().is_none());
        assert_eq!(g.awaiting(), Some(0));
    }

    #[test]
    fn not_enough_players_with_chips() {
        let mut g = mk_game(2);
        g.betting.players[0].stack = 0;
        assert!(matches!(g.new_hand(), Err(GameError::NotEnoughPlayers(1))));
    }
}
