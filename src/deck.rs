use crate::cards::{Card, Rank, Suit};
use crate::hand::HoleCards;
use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested} cards, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
    #[error("duplicate card in deck: {0}")]
    DuplicateCard(Card),
}

/// A deck of cards. Cards leave from the top and are remembered as dealt, so the deck
/// never hands out the same card twice.
#[derive(Debug, Clone)]
pub struct Deck {
    // top of the deck is the end of the vector
    cards: Vec<Card>,
    dealt: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining_count(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &s in Suit::ALL.iter() {
            for &r in Rank::ALL.iter() {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards, dealt: Vec::new() }
    }

    /// Build a deck that deals `cards` in the given order (first element dealt first).
    /// Useful for replaying a known hand.
    pub fn stacked(cards: Vec<Card>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for &c in &cards {
            if !seen.insert(c) {
                return Err(DeckError::DuplicateCard(c));
            }
        }
        let mut cards = cards;
        cards.reverse();
        Ok(Self { cards, dealt: Vec::new() })
    }

    pub fn remaining_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still in the deck, top card last.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    /// Cards dealt so far, in dealing order.
    pub fn dealt(&self) -> &[Card] {
        &self.dealt
    }

    /// Shuffle the remaining cards using a fresh random seed.
    pub fn shuffle(&mut self) {
        let seed: u64 = rand::rng().random();
        self.shuffle_seeded(seed);
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with(&mut ChaCha8Rng::seed_from_u64(seed));
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal one card from the top of the deck.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::Exhausted { requested: 1, remaining: 0 })?;
        self.dealt.push(card);
        Ok(card)
    }

    /// Deal `n` cards from the top. Either all `n` are dealt or none are.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        self.ensure(n)?;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.draw()?);
        }
        Ok(out)
    }

    /// Deal two hole cards to each of `seats` players, two consecutive cards per seat.
    pub fn deal_hole(&mut self, seats: usize) -> Result<Vec<HoleCards>, DeckError> {
        self.ensure(seats * 2)?;
        let mut out = Vec::with_capacity(seats);
        for _ in 0..seats {
            let a = self.draw()?;
            let b = self.draw()?;
            // cards in a deck are unique, so two consecutive draws always differ
            out.push(HoleCards::from_dealt(a, b));
        }
        debug!("dealt hole cards to {seats} seats, {} cards left", self.remaining_count());
        Ok(out)
    }

    pub fn deal_flop(&mut self) -> Result<[Card; 3], DeckError> {
        self.ensure(3)?;
        let flop = [self.draw()?, self.draw()?, self.draw()?];
        debug!("flop {} {} {}", flop[0], flop[1], flop[2]);
        Ok(flop)
    }

    pub fn deal_turn(&mut self) -> Result<Card, DeckError> {
        let card = self.draw()?;
        debug!("turn {card}");
        Ok(card)
    }

    pub fn deal_river(&mut self) -> Result<Card, DeckError> {
        let card = self.draw()?;
        debug!("river {card}");
        Ok(card)
    }

    fn ensure(&self, requested: usize) -> Result<(), DeckError> {
        if requested > self.cards.len() {
            return Err(DeckError::Exhausted { requested, remaining: self.cards.len() });
        }
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
