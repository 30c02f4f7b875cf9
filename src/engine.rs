// Minimal game engine API boundary. This trait exposes the table actions and
// queries so front ends and agents can drive a hand without depending on the
// game internals. It is implemented for the core `Game` type.

use crate::action::Action;
use crate::betting::{Step, Street};
use crate::game::{Game, GameError, Showdown};
use crate::hand::{CommunityCards, HoleCards};

pub trait GameEngine {
    // Hand lifecycle
    fn new_hand(&mut self) -> Result<(), GameError>;

    // The single action entry point
    fn act(&mut self, action: Action) -> Result<Step, GameError>;

    // Queries
    fn awaiting(&self) -> Option<usize>;
    fn round_bet(&self) -> u64;
    fn pot(&self) -> u64;
    fn hole_cards(&self, seat: usize) -> Option<HoleCards>;
    fn board(&self) -> &CommunityCards;
    fn stack(&self, seat: usize) -> u64;
    fn bet(&self, seat: usize) -> u64;
    fn dealer(&self) -> usize;
    fn street(&self) -> Street;
    fn num_players(&self) -> usize;
    fn is_hand_over(&self) -> bool;
    fn showdown(&self) -> Option<&Showdown>;

    /// Chips the seat must add to match the round bet level.
    fn to_call(&self, seat: usize) -> u64 {
        self.round_bet().saturating_sub(self.bet(seat))
    }
}

impl GameEngine for Game {
    fn new_hand(&mut self) -> Result<(), GameError> {
        self.new_hand()
    }

    fn act(&mut self, action: Action) -> Result<Step, GameError> {
        self.act(action)
    }

    fn awaiting(&self) -> Option<usize> {
        self.awaiting()
    }
    fn round_bet(&self) -> u64 {
        self.round_bet()
    }
    fn pot(&self) -> u64 {
        self.pot()
    }
    fn hole_cards(&self, seat: usize) -> Option<HoleCards> {
        self.player(seat).and_then(|p| p.hole())
    }
    fn board(&self) -> &CommunityCards {
        &self.board
    }
    fn stack(&self, seat: usize) -> u64 {
        self.player(seat).map(|p| p.stack()).unwrap_or(0)
    }
    fn bet(&self, seat: usize) -> u64 {
        self.player(seat).map(|p| p.bet()).unwrap_or(0)
    }
    fn dealer(&self) -> usize {
        self.dealer()
    }
    fn street(&self) -> Street {
        self.street()
    }
    fn num_players(&self) -> usize {
        self.players().len()
    }
    fn is_hand_over(&self) -> bool {
        self.is_hand_over()
    }
    fn showdown(&self) -> Option<&Showdown> {
        self.showdown.as_ref()
    }
}
