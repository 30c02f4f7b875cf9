use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many community cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate community cards")]
    DuplicateBoardCards,
    #[error("hole cards overlap with community cards")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("community cards must be revealed in order: {0}")]
    OutOfOrder(&'static str),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_rs::cards::{Card, Rank, Suit};
/// use holdem_rs::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    /// Cards that came off a deck are distinct by construction.
    pub(crate) fn from_dealt(a: Card, b: Card) -> Self {
        debug_assert_ne!(a, b);
        Self(a, b)
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards, revealed street by street: flop (3), turn (1), river (1).
///
/// ```
/// use holdem_rs::hand::CommunityCards;
///
/// let board: CommunityCards = "2d 2c 9s Kd 4h".parse().unwrap();
/// assert_eq!(board.flop().map(|f| f.len()), Some(3));
/// assert!(board.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityCards {
    cards: Vec<Card>,
}

impl CommunityCards {
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(5) }
    }

    /// Build a board from up to five distinct cards in reveal order.
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > 5 {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == 5
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn flop(&self) -> Option<&[Card]> {
        self.cards.get(..3)
    }

    pub fn turn(&self) -> Option<Card> {
        self.cards.get(3).copied()
    }

    pub fn river(&self) -> Option<Card> {
        self.cards.get(4).copied()
    }

    pub(crate) fn reveal_flop(&mut self, flop: [Card; 3]) -> Result<(), HandError> {
        if !self.cards.is_empty() {
            return Err(HandError::OutOfOrder("flop after other cards"));
        }
        self.cards.extend(flop);
        Ok(())
    }

    pub(crate) fn reveal_turn(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() != 3 {
            return Err(HandError::OutOfOrder("turn before flop"));
        }
        self.cards.push(card);
        Ok(())
    }

    pub(crate) fn reveal_river(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() != 4 {
            return Err(HandError::OutOfOrder("river before turn"));
        }
        self.cards.push(card);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for CommunityCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        CommunityCards::try_new(cards)
    }
}

/// Validate that hole cards and community cards can coexist: at most five board cards and
/// no card appearing twice across both.
///
/// ```
/// use holdem_rs::hand::{validate_holdem, CommunityCards, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: CommunityCards = "2c 3c 4c".parse().unwrap();
/// validate_holdem(&hole, &board).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &CommunityCards) -> Result<(), HandError> {
    if board.len() > 5 {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    let set: HashSet<Card> = board.as_slice().iter().copied().collect();
    if set.len() != board.len() {
        return Err(HandError::DuplicateBoardCards);
    }
    if set.contains(&hole.first()) || set.contains(&hole.second()) {
        return Err(HandError::Overlap);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}
