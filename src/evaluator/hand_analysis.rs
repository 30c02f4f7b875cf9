use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, Evaluation, HandValue};

/// Pre-computed analysis of a 5 to 7 card set.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Strongest first (Ace high), ties broken by suit.
    pub sorted_cards: Vec<Card>,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
    /// Straight found inside the flush suit only.
    pub straight_flush_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut sorted_cards = cards.to_vec();
        sorted_cards.sort_by(|a, b| {
            b.rank().high_value().cmp(&a.rank().high_value()).then(b.suit().cmp(&a.suit()))
        });

        let mut rank_counts = [0u8; 15];
        for c in &sorted_cards {
            rank_counts[c.rank().high_value() as usize] += 1;
        }

        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(&sorted_cards);
        let straight_info = StraightInfo::detect_cards(&sorted_cards);
        let straight_flush_info = StraightInfo::detect_cards(&suit_info.flush_cards);

        Self { sorted_cards, rank_groups, suit_info, straight_info, straight_flush_info }
    }

    /// Pick the cards of the given ranks (`n` of each, in order), then fill up to five
    /// with the strongest remaining cards.
    pub fn pick(&self, groups: &[(Rank, usize)]) -> [Card; 5] {
        let mut out: Vec<Card> = Vec::with_capacity(5);
        for &(rank, n) in groups {
            out.extend(self.sorted_cards.iter().copied().filter(|c| c.rank() == rank).take(n));
        }
        for &c in &self.sorted_cards {
            if out.len() >= 5 {
                break;
            }
            if !out.contains(&c) {
                out.push(c);
            }
        }
        to_five(&out)
    }

    /// Five cards forming the straight that tops out at `top`, one per rank,
    /// chosen from `cards` (which must be sorted strongest first).
    pub fn straight_cards(cards: &[Card], top: Rank) -> [Card; 5] {
        let top = top.high_value();
        let mut out: Vec<Card> = Vec::with_capacity(5);
        for v in (top - 4..=top).rev() {
            // value 1 is the low Ace
            let want = if v == 1 { 14 } else { v };
            if let Some(c) = cards.iter().copied().find(|c| c.rank().high_value() == want) {
                out.push(c);
            }
        }
        to_five(&out)
    }

    /// Build an Evaluation from a category, the chosen five cards and tiebreak ranks.
    pub fn build_evaluation(
        &self,
        category: Category,
        best_five: [Card; 5],
        tiebreak: [Rank; 5],
    ) -> Evaluation {
        let value = HandValue::from_parts(category, &tiebreak);
        Evaluation { category, best_five, value }
    }
}

/// Ranks of five cards in order, as a tiebreak array.
pub fn ranks_of(cards: &[Card; 5]) -> [Rank; 5] {
    [cards[0].rank(), cards[1].rank(), cards[2].rank(), cards[3].rank(), cards[4].rank()]
}

fn to_five(cards: &[Card]) -> [Card; 5] {
    debug_assert!(cards.len() >= 5, "analysis needs at least five cards");
    let mut out = [cards[0]; 5];
    for (slot, c) in out.iter_mut().zip(cards.iter()) {
        *slot = *c;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};

    fn analyze(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_royal_flush_analysis() {
        let analysis = analyze("As Ks Qs Js Ts 2d 3c");
        assert!(analysis.suit_info.is_flush());
        assert!(analysis.straight_info.is_straight);
        assert_eq!(analysis.straight_flush_info.top_rank, Some(Rank::Ace));
        assert_eq!(analysis.rank_groups.quad(), None);
        assert_eq!(analysis.rank_groups.pairs(), vec![]);
    }

    #[test]
    fn test_flush_and_straight_in_different_cards() {
        // spade flush, straight 9-K only with the off-suit nine
        let analysis = analyze("Ks Qs Js Ts 9h 2s 3d");
        assert!(analysis.suit_info.is_flush());
        assert!(analysis.straight_info.is_straight);
        assert!(!analysis.straight_flush_info.is_straight);
    }

    #[test]
    fn test_pick_fills_with_kickers() {
        let analysis = analyze("9c 9d Ah 7s 5h 3c 2d");
        let five = analysis.pick(&[(Rank::Nine, 2)]);
        let ranks: Vec<Rank> = five.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Nine, Rank::Nine, Rank::Ace, Rank::Seven, Rank::Five]);
    }

    #[test]
    fn test_wheel_cards() {
        let analysis = analyze("Ah 2d 3c 4s 5h Kc Qd");
        let top = analysis.straight_info.top_rank.unwrap();
        assert_eq!(top, Rank::Five);
        let five = HandAnalysis::straight_cards(&analysis.sorted_cards, top);
        assert_eq!(five[0].rank(), Rank::Five);
        assert_eq!(five[4], crate::cards::Card::new(Rank::Ace, Suit::Hearts));
    }

    #[test]
    fn test_cards_sorted_ace_high() {
        let analysis = analyze("3s Ah 5d Kc 9s");
        let ranks: Vec<Rank> = analysis.sorted_cards.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::King, Rank::Nine, Rank::Five, Rank::Three]);
    }
}
