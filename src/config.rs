use crate::deck::DECK_SIZE;

/// Most seats one deck can serve: two hole cards each plus a full board.
pub const MAX_PLAYERS: usize = (DECK_SIZE - 5) / 2;

pub const DEFAULT_STACK: u64 = 1000;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("at most {max} players fit one deck, got {got}")]
    TooManyPlayers { max: usize, got: usize },
    #[error("player {0} has an empty name")]
    EmptyName(usize),
    #[error("duplicate player name: {0}")]
    DuplicateName(String),
    #[error("player {0} starts without chips")]
    EmptyStack(String),
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatConfig {
    pub name: String,
    pub stack: u64,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, stack: u64) -> Self {
        Self { name: name.into(), stack }
    }
}

/// Table setup: seats in table order and an optional shuffle seed.
///
/// ```
/// use holdem_rs::config::TableConfig;
///
/// let cfg = TableConfig::with_players(4, 500).with_seed(7);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.players.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub players: Vec<SeatConfig>,
    pub seed: Option<u64>,
}

impl TableConfig {
    /// `n` seats named P1..Pn with the same stack.
    pub fn with_players(n: usize, stack: u64) -> Self {
        let players = (1..=n).map(|i| SeatConfig::new(format!("P{i}"), stack)).collect();
        Self { players, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_player(mut self, name: impl Into<String>, stack: u64) -> Self {
        self.players.push(SeatConfig::new(name, stack));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.players.len();
        if n < 2 {
            return Err(ConfigError::TooFewPlayers(n));
        }
        if n > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers { max: MAX_PLAYERS, got: n });
        }
        for (i, seat) in self.players.iter().enumerate() {
            if seat.name.trim().is_empty() {
                return Err(ConfigError::EmptyName(i));
            }
            if seat.stack == 0 {
                return Err(ConfigError::EmptyStack(seat.name.clone()));
            }
            if self.players[..i].iter().any(|s| s.name == seat.name) {
                return Err(ConfigError::DuplicateName(seat.name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::with_players(3, DEFAULT_STACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_seats() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.players.len(), 3);
        assert!(cfg.players.iter().all(|s| s.stack == DEFAULT_STACK));
        assert_eq!(cfg.seed, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn seat_limits() {
        assert_eq!(MAX_PLAYERS, 23);
        assert_eq!(TableConfig::with_players(1, 10).validate(), Err(ConfigError::TooFewPlayers(1)));
        assert!(TableConfig::with_players(23, 10).validate().is_ok());
        assert_eq!(
            TableConfig::with_players(24, 10).validate(),
            Err(ConfigError::TooManyPlayers { max: 23, got: 24 })
        );
    }

    #[test]
    fn names_and_stacks_checked() {
        let cfg = TableConfig::with_players(2, 10).with_player("P1", 10);
        assert_eq!(cfg.validate(), Err(ConfigError::DuplicateName("P1".into())));
        let cfg = TableConfig::with_players(2, 10).with_player(" ", 10);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyName(2)));
        let cfg = TableConfig::with_players(2, 10).with_player("Zed", 0);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyStack("Zed".into())));
    }
}
