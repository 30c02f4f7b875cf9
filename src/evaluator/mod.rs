pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, CommunityCards, HandError, HoleCards};
use core::cmp::Ordering;
use core::fmt;

pub use detector::{CategoryDetector, DETECTORS};

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
///
/// Royal flush is kept as its own category even though it is only the
/// ace-high straight flush, so that results can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    /// All categories, strongest first (detector order).
    pub const DESCENDING: [Category; 10] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::Pair,
        Category::HighCard,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Human readable name used in results.
    pub const fn label(self) -> &'static str {
        match self {
            Category::RoyalFlush => "Royal flush",
            Category::StraightFlush => "Straight flush",
            Category::FourOfAKind => "Four of a kind",
            Category::FullHouse => "Full house",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a kind",
            Category::TwoPair => "Two pair",
            Category::Pair => "Pair",
            Category::HighCard => "High card",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    pub const fn label(&self) -> &'static str {
        self.category.label()
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Category stored in the high bits.
    pub fn category(self) -> Category {
        let ord = (self.0 >> 48) as u8;
        Category::DESCENDING
            .iter()
            .copied()
            .find(|c| c.ordinal() == ord)
            .unwrap_or(Category::HighCard)
    }

    /// Pack a category and five rank tiebreakers into a comparable value.
    /// Ranks are stored by their ace-high strength (2..=14), 6 bits each.
    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 18 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category.ordinal() as u64) << CAT_SHIFT;
        for (i, r) in ranks_desc.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (r.high_value() as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("expected 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate cards in evaluation input")]
    DuplicateCards,
}

/// Evaluate any set of 5 to 7 distinct cards.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::{evaluate_cards, Category};
///
/// let cards = parse_cards("2♦ 2♣ 9♠ K♦ 4♥ 2h 7c").unwrap();
/// let eval = evaluate_cards(&cards).unwrap();
/// assert_eq!(eval.category, Category::ThreeOfAKind);
/// assert_eq!(eval.label(), "Three of a kind");
/// ```
pub fn evaluate_cards(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    for (i, c) in cards.iter().enumerate() {
        if cards[i + 1..].contains(c) {
            return Err(EvalError::DuplicateCards);
        }
    }
    Ok(detector::classify(&hand_analysis::HandAnalysis::new(cards)))
}

/// Evaluate a Hold'em hand given hole cards and a complete board.
/// Validates inputs, builds the 7-card set (2 hole + 5 board),
/// and returns the best five-card evaluation with category and tiebreaks.
///
/// ```
/// use holdem_rs::cards::{Card, Rank, Suit};
/// use holdem_rs::evaluator::{evaluate_holdem, Category};
/// use holdem_rs::hand::{CommunityCards, HoleCards};
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// let board = CommunityCards::try_new(vec![
///     Card::new(Rank::Queen, Suit::Clubs),
///     Card::new(Rank::Jack, Suit::Diamonds),
///     Card::new(Rank::Nine, Suit::Hearts),
///     Card::new(Rank::Three, Suit::Spades),
///     Card::new(Rank::Two, Suit::Clubs),
/// ]).unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &CommunityCards) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let b = board.as_slice();
    if !board.is_complete() {
        return Err(EvalError::CardCount(2 + b.len()));
    }
    let seven = [hole.first(), hole.second(), b[0], b[1], b[2], b[3], b[4]];
    Ok(evaluate_seven(&seven))
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    detector::classify(&hand_analysis::HandAnalysis::new(cards))
}

/// Evaluate seven cards in one pass over the chain. The analysis looks at all
/// seven cards at once, so the result equals the best of the 21 five-card subsets.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    detector::classify(&hand_analysis::HandAnalysis::new(cards))
}

/// Compare two Hold'em hands on a shared board. Returns the ordering or a validation error.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::compare_holdem;
/// use holdem_rs::hand::{CommunityCards, HoleCards};
/// use std::cmp::Ordering;
///
/// let board = CommunityCards::try_new(parse_cards("Qc Jd 9h 3s 2c").unwrap()).unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(
    a: &HoleCards,
    b: &HoleCards,
    board: &CommunityCards,
) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card, Rank, Suit};

    fn hole(a: Card, b: Card) -> HoleCards {
        HoleCards::try_new(a, b).expect("valid hole cards")
    }

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn short_board_errors() {
        let hole = hole(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::King, Suit::Spades));
        let board = CommunityCards::try_new(parse_cards("2c 7d 9h").unwrap()).unwrap();
        let err = evaluate_holdem(&hole, &board).unwrap_err();
        assert!(matches!(err, EvalError::CardCount(5)));
    }

    #[test]
    fn overlap_is_invalid_hand() {
        let hole = hole(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::King, Suit::Spades));
        let board = CommunityCards::try_new(parse_cards("As 7d 9h 2c 3c").unwrap()).unwrap();
        let err = evaluate_holdem(&hole, &board).unwrap_err();
        assert!(matches!(err, EvalError::InvalidHand(HandError::Overlap)));
    }

    #[test]
    fn evaluate_cards_checks_input() {
        let four = parse_cards("As Ks Qs Js").unwrap();
        assert!(matches!(evaluate_cards(&four), Err(EvalError::CardCount(4))));
        let dup = parse_cards("As Ks Qs Js As").unwrap();
        assert!(matches!(evaluate_cards(&dup), Err(EvalError::DuplicateCards)));
    }

    #[test]
    fn evaluate_five_categories() {
        let cases = [
            ("As Ks Qs Js Ts", Category::RoyalFlush),
            ("9s 8s 7s 6s 5s", Category::StraightFlush),
            ("Kc Kd Kh Ks 2s", Category::FourOfAKind),
            ("Tc Td Th 2s 2h", Category::FullHouse),
            ("Ah 9h 7h 3h 2h", Category::Flush),
            ("Ac 2d 3h 4s 5c", Category::Straight),
            ("Qc Qd Qh 9s 2c", Category::ThreeOfAKind),
            ("Jc Jd 9c 9h 2s", Category::TwoPair),
            ("Ah Ad Ts 9c 2d", Category::Pair),
            ("Ah Kd 7s 5c 2d", Category::HighCard),
        ];
        for (cards, want) in cases {
            assert_eq!(evaluate_five(&five(cards)).category, want, "{cards}");
        }
    }

    #[test]
    fn labels_match_category_names() {
        assert_eq!(Category::RoyalFlush.to_string(), "Royal flush");
        assert_eq!(Category::ThreeOfAKind.label(), "Three of a kind");
        assert_eq!(Category::HighCard.label(), "High card");
    }

    #[test]
    fn hand_value_orders_by_category_then_ranks() {
        let wheel = evaluate_five(&five("Ac 2d 3h 4s 5c"));
        let six_high = evaluate_five(&five("2c 3d 4h 5s 6c"));
        assert!(six_high > wheel);

        let aces_king = evaluate_five(&five("Ah Ad Ks 9c 2d"));
        let aces_queen = evaluate_five(&five("Ac As Qs 9d 2h"));
        assert!(aces_king > aces_queen);

        let low_flush = evaluate_five(&five("7h 5h 4h 3h 2h"));
        assert!(low_flush > six_high);
        assert_eq!(low_flush.value().category(), Category::Flush);
    }

    #[test]
    fn equal_hands_in_other_suits_tie() {
        let a = evaluate_five(&five("Ah Kd 7s 5c 2d"));
        let b = evaluate_five(&five("As Kc 7h 5d 2h"));
        assert_eq!(a, b);
        assert_eq!(a.value().raw(), b.value().raw());
    }
}
