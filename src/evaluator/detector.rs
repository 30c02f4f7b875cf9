use super::hand_analysis::{ranks_of, HandAnalysis};
use crate::cards::Rank;
use crate::evaluator::{Category, Evaluation};

/// Strategy pattern: each category detector knows how to detect and build its evaluation.
///
/// Detectors are pure predicates over the shared analysis. They are consulted in the
/// order of [`DETECTORS`] and the first match decides the category.
pub trait CategoryDetector {
    fn category(&self) -> Category;
    fn detect(&self, analysis: &HandAnalysis) -> bool;
    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ten through Ace, all within one suit
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn category(&self) -> Category {
        Category::RoyalFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_flush_info.top_rank == Some(Rank::Ace)
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let five = HandAnalysis::straight_cards(&analysis.suit_info.flush_cards, Rank::Ace);
        analysis.build_evaluation(Category::RoyalFlush, five, ranks_of(&five))
    }
}

/// Straight Flush: five consecutive ranks within the flush suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_flush_info.is_straight
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let top = analysis.straight_flush_info.top_rank.unwrap_or(Rank::Five);
        let five = HandAnalysis::straight_cards(&analysis.suit_info.flush_cards, top);
        analysis.build_evaluation(Category::StraightFlush, five, ranks_of(&five))
    }
}

/// Four of a Kind: four cards of the same rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.quad().is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let quad = analysis.rank_groups.quad().unwrap_or(Rank::Two);
        let five = analysis.pick(&[(quad, 4)]);
        analysis.build_evaluation(Category::FourOfAKind, five, ranks_of(&five))
    }
}

/// Full House: three of a kind plus another rank with at least two cards
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.full_house().is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let (trips, pair) = analysis.rank_groups.full_house().unwrap_or((Rank::Two, Rank::Two));
        let five = analysis.pick(&[(trips, 3), (pair, 2)]);
        analysis.build_evaluation(Category::FullHouse, five, ranks_of(&five))
    }
}

/// Flush: five or more cards of one suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.suit_info.is_flush()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let fc = &analysis.suit_info.flush_cards;
        let five = [fc[0], fc[1], fc[2], fc[3], fc[4]];
        analysis.build_evaluation(Category::Flush, five, ranks_of(&five))
    }
}

/// Straight: five consecutive ranks, any suits
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_info.is_straight
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let top = analysis.straight_info.top_rank.unwrap_or(Rank::Five);
        let five = HandAnalysis::straight_cards(&analysis.sorted_cards, top);
        analysis.build_evaluation(Category::Straight, five, ranks_of(&five))
    }
}

/// Three of a Kind: three cards of the same rank
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.trips().is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let trips = analysis.rank_groups.trips().unwrap_or(Rank::Two);
        let five = analysis.pick(&[(trips, 3)]);
        analysis.build_evaluation(Category::ThreeOfAKind, five, ranks_of(&five))
    }
}

/// Two Pair: two (or more) pairs; the best two play
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() >= 2
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let pairs = analysis.rank_groups.pairs();
        let five = analysis.pick(&[(pairs[0], 2), (pairs[1], 2)]);
        analysis.build_evaluation(Category::TwoPair, five, ranks_of(&five))
    }
}

/// Pair: two cards of the same rank
pub struct PairDetector;

impl CategoryDetector for PairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        !analysis.rank_groups.pairs().is_empty()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let pair = analysis.rank_groups.pairs().first().copied().unwrap_or(Rank::Two);
        let five = analysis.pick(&[(pair, 2)]);
        analysis.build_evaluation(Category::Pair, five, ranks_of(&five))
    }
}

/// High Card: terminal fallback
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn detect(&self, _analysis: &HandAnalysis) -> bool {
        true
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let five = analysis.pick(&[]);
        analysis.build_evaluation(Category::HighCard, five, ranks_of(&five))
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &PairDetector,
    &HighCardDetector,
];

/// Run the chain: the first detector that matches builds the evaluation.
pub fn classify(analysis: &HandAnalysis) -> Evaluation {
    for detector in DETECTORS.iter() {
        if detector.detect(analysis) {
            return detector.build_evaluation(analysis);
        }
    }
    HighCardDetector.build_evaluation(analysis)
}
