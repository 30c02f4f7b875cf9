use core::fmt;
use std::str::FromStr;

/// A betting decision for the seat that is currently awaiting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Check,
    Call,
    /// Raise the round bet level to this amount.
    Raise(u64),
    Fold,
    AllIn,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Raise(_) => "Raise",
            Action::Fold => "Fold",
            Action::AllIn => "All in",
        }
    }

    /// Map the numeric action menu (0 check, 1 call, 2 raise, 3 fold, 4 all in).
    /// `amount` is only used by raises.
    ///
    /// ```
    /// use holdem_rs::action::Action;
    ///
    /// assert_eq!(Action::from_code(2, 40).unwrap(), Action::Raise(40));
    /// assert!(Action::from_code(9, 0).is_err());
    /// ```
    pub fn from_code(code: u8, amount: u64) -> Result<Self, ActionError> {
        match code {
            0 => Ok(Action::Check),
            1 => Ok(Action::Call),
            2 => Ok(Action::Raise(amount)),
            3 => Ok(Action::Fold),
            4 => Ok(Action::AllIn),
            other => Err(ActionError::Unrecognized(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Raise(amount) => write!(f, "Raise {amount}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Parses "check", "call", "fold", "allin"/"all in", "raise 50", single-letter
/// shortcuts (x, c, f, a, r 50) and the numeric menu ("2 50").
impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut parts = lower.split_whitespace();
        let head = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();
        let amount = |rest: &[&str]| -> Result<u64, ActionError> {
            match rest {
                [n] => n.parse::<u64>().map_err(|_| ActionError::Unrecognized(s.trim().into())),
                _ => Err(ActionError::Unrecognized(s.trim().into())),
            }
        };
        match (head, rest.as_slice()) {
            ("check" | "x", []) => Ok(Action::Check),
            ("call" | "c", []) => Ok(Action::Call),
            ("fold" | "f", []) => Ok(Action::Fold),
            ("allin" | "all-in" | "a", []) | ("all", ["in"]) => Ok(Action::AllIn),
            ("raise" | "r", rest) => Ok(Action::Raise(amount(rest)?)),
            (code, rest) if code.parse::<u8>().is_ok() => {
                let code = code.parse::<u8>().map_err(|_| ActionError::Unrecognized(s.into()))?;
                let amt = if code == 2 { amount(rest)? } else { 0 };
                if code != 2 && !rest.is_empty() {
                    return Err(ActionError::Unrecognized(s.trim().into()));
                }
                Action::from_code(code, amt)
            }
            _ => Err(ActionError::Unrecognized(s.trim().into())),
        }
    }
}

/// Reasons an action is rejected. The state is left untouched and the same
/// seat is asked again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("the hand is over, no more betting")]
    HandOver,
    #[error("no player is awaiting action")]
    NoActor,
    #[error("insufficient funds: need {need}, stack {stack}")]
    InsufficientFunds { need: u64, stack: u64 },
    #[error("bet must meet or exceed the current bet of {current}, got {got}")]
    BelowCurrentBet { current: u64, got: u64 },
    #[error("unrecognized action: '{0}'")]
    Unrecognized(String),
}

/// Front-end facing outcome of a submitted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub accepted: bool,
    pub reason: Option<String>,
}

impl ActionResponse {
    pub fn accepted() -> Self {
        Self { accepted: true, reason: None }
    }

    pub fn rejected(reason: impl fmt::Display) -> Self {
        Self { accepted: false, reason: Some(reason.to_string()) }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for ActionResponse {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(_) => Self::accepted(),
            Err(e) => Self::rejected(e),
        }
    }
}
