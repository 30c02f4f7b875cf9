use crate::cards::{Card, Rank};

/// Information about the best straight in a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Find the highest run of five consecutive ranks. Ace plays both high (T-J-Q-K-A)
    /// and low (A-2-3-4-5, where Five is the top). Duplicate ranks and suits are ignored;
    /// only rank adjacency counts.
    pub fn detect<I>(ranks: I) -> Self
    where
        I: IntoIterator<Item = Rank>,
    {
        // bit v set when a rank of strength v is present; bit 1 mirrors the Ace
        let mut mask: u16 = 0;
        for r in ranks {
            mask |= 1 << r.high_value();
            if r == Rank::Ace {
                mask |= 1 << 1;
            }
        }
        for top in (5u8..=14).rev() {
            let run: u16 = 0b11111 << (top - 4);
            if mask & run == run {
                return StraightInfo { is_straight: true, top_rank: Rank::from_high_value(top) };
            }
        }
        StraightInfo { is_straight: false, top_rank: None }
    }

    pub fn detect_cards(cards: &[Card]) -> Self {
        Self::detect(cards.iter().map(|c| c.rank()))
    }
}
