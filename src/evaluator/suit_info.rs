use crate::cards::{Card, Suit};

/// Flush information: the suit holding five or more of the cards, and those cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitInfo {
    pub flush_suit: Option<Suit>,
    /// Cards of the flush suit, strongest first. Empty without a flush.
    pub flush_cards: Vec<Card>,
}

impl SuitInfo {
    /// `sorted` must be ordered strongest first; the flush cards keep that order.
    pub fn detect(sorted: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        for c in sorted {
            counts[c.suit().index()] += 1;
        }
        // With at most seven cards only one suit can reach five.
        let flush_suit = Suit::ALL.iter().copied().find(|s| counts[s.index()] >= 5);
        let flush_cards = match flush_suit {
            Some(suit) => sorted.iter().copied().filter(|c| c.suit() == suit).collect(),
            None => Vec::new(),
        };
        SuitInfo { flush_suit, flush_cards }
    }

    pub fn is_flush(&self) -> bool {
        self.flush_suit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn test_flush_among_seven() {
        let cards = parse_cards("Ah Kh 9h 7s 5h 3h 2c").unwrap();
        let info = SuitInfo::detect(&cards);
        assert!(info.is_flush());
        assert_eq!(info.flush_suit, Some(Suit::Hearts));
        assert_eq!(info.flush_cards.len(), 5);
        assert_eq!(info.flush_cards[0], cards[0]);
    }

    #[test]
    fn test_four_suited_is_not_flush() {
        let cards = parse_cards("As Ks Qs Js Th 9d 2c").unwrap();
        let info = SuitInfo::detect(&cards);
        assert!(!info.is_flush());
        assert!(info.flush_cards.is_empty());
    }
}
