use crate::cards::Rank;

/// Groups ranks by their frequency in a hand, sorted by (count desc, strength desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from a count array indexed by [`Rank::high_value`] (2-14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups = Vec::new();

        for rank in Rank::ALL.iter().copied() {
            let count = rank_counts[rank.high_value() as usize];
            if count > 0 {
                groups.push((rank, count));
            }
        }

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.high_value().cmp(&a.0.high_value())));

        Self { groups }
    }

    /// Returns the rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == 4).map(|(rank, _)| *rank)
    }

    /// Returns the strongest three-of-a-kind rank, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == 3).map(|(rank, _)| *rank)
    }

    /// Returns all pair ranks, strongest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == 2).map(|(rank, _)| *rank).collect()
    }

    /// Trips rank plus the strongest other rank holding at least two cards.
    /// Seven cards can hold two sets of trips; the lower one fills the pair slot.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips()?;
        let filler = self
            .groups
            .iter()
            .filter(|(rank, count)| *rank != trips && (2..=3).contains(count))
            .map(|(rank, _)| *rank)
            .max_by_key(|rank| rank.high_value())?;
        Some((trips, filler))
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
