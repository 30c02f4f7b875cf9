//! Agents: pluggable players (bots, humans fed by a front end).
//!
//! `PlayerAgent` picks an action for a seat; `AgentTable` maps seats to agents,
//! applies their choices to a [`GameEngine`] and re-prompts an agent whose
//! action was rejected. After too many rejections in a row the seat folds.

use crate::action::{Action, ActionError};
use crate::betting::Step;
use crate::engine::GameEngine;
use crate::game::GameError;
use core::fmt;
use log::warn;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rejections tolerated from one agent in a row before it is folded.
pub const DEFAULT_MAX_REJECTS: u32 = 3;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that decides for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` is awaiting action. `None` means no decision yet.
    fn decide(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<Action>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an action intent; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
    /// Told when the last decided action was rejected.
    fn rejected(&mut self, _reason: &ActionError) {}
}

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// Plays queued intents, in order, when it is the seat's turn.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: VecDeque<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl PlayerAgent for HumanAgent {
    fn decide(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<Action> {
        if engine.is_hand_over() {
            self.pending.clear();
            return None;
        }
        if engine.awaiting() != Some(seat) {
            return None;
        }
        self.pending.pop_front()
    }
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        self.pending.push_back(action);
        true
    }
    fn rejected(&mut self, _reason: &ActionError) {
        // later intents were queued against a state that did not happen
        self.pending.clear();
    }
}

/// Result of driving the awaiting seat once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnOutcome {
    /// Nobody acted: no agent at the seat, no decision yet, or throttled.
    Idle,
    Acted { seat: usize, action: Action, step: Step },
    /// The agent will be asked again.
    Rejected { seat: usize, action: Action, reason: ActionError },
    /// The agent kept choosing invalid actions and was folded.
    ForcedFold { seat: usize, step: Step },
}

/// Manages a set of optional agents, one per seat, and drives the agent at the
/// awaiting seat.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    rejects: Vec<u32>,
    max_rejects: u32,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self {
            seats,
            rejects: vec![0; n],
            max_rejects: DEFAULT_MAX_REJECTS,
            min_action_delay: Duration::from_millis(0),
            next_action_at: None,
        }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
            self.rejects.resize(seat + 1, 0);
        }
        self.seats[seat] = agent;
        self.rejects[seat] = 0;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).map(|a| a.is_some()).unwrap_or(false)
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| matches!(ag.kind(), AgentKind::Bot))
    }

    /// Send an action intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: usize, action: Action) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(action);
        }
        false
    }

    pub fn set_max_rejects(&mut self, max: u32) {
        self.max_rejects = max.max(1);
    }

    /// Set a global minimum delay between bot actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent at the awaiting seat, if any. Rejected actions are reported
    /// as outcomes; other engine failures are returned as errors.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<TurnOutcome, GameError> {
        let Some(seat) = engine.awaiting() else {
            return Ok(TurnOutcome::Idle);
        };
        let Some(Some(agent)) = self.seats.get_mut(seat) else {
            return Ok(TurnOutcome::Idle);
        };
        let is_bot = matches!(agent.kind(), AgentKind::Bot);
        let now = Instant::now();
        if is_bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(TurnOutcome::Idle);
                }
            }
        }
        let Some(action) = agent.decide(&*engine, seat) else {
            return Ok(TurnOutcome::Idle);
        };

        match engine.act(action) {
            Ok(step) => {
                self.rejects[seat] = 0;
                if is_bot && self.min_action_delay > Duration::from_millis(0) {
                    self.next_action_at = Some(now + self.min_action_delay);
                }
                Ok(TurnOutcome::Acted { seat, action, step })
            }
            Err(GameError::Action(reason)) => {
                agent.rejected(&reason);
                self.rejects[seat] += 1;
                warn!("seat {seat} {action} rejected ({}x): {reason}", self.rejects[seat]);
                if self.rejects[seat] < self.max_rejects {
                    return Ok(TurnOutcome::Rejected { seat, action, reason });
                }
                self.rejects[seat] = 0;
                let step = engine.act(Action::Fold)?;
                Ok(TurnOutcome::ForcedFold { seat, step })
            }
            Err(e) => Err(e),
        }
    }

    /// Drive agents until the hand is over or nobody can make progress.
    pub fn run_hand(&mut self, engine: &mut dyn GameEngine) -> Result<(), GameError> {
        while !engine.is_hand_over() {
            if self.on_turn(engine)? == TurnOutcome::Idle {
                if self.next_action_at.is_some_and(|t| Instant::now() < t) {
                    std::thread::sleep(self.min_action_delay);
                    continue;
                }
                break;
            }
        }
        Ok(())
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
        self.rejects.iter_mut().for_each(|r| *r = 0);
        self.next_action_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::game::Game;

    fn mk_game(n: usize) -> Game {
        let mut g = Game::new(TableConfig::with_players(n, 1000).with_seed(11)).unwrap();
        g.new_hand().unwrap();
        g
    }

    /// Always answers with the same action.
    struct Stubborn(Action);

    impl PlayerAgent for Stubborn {
        fn decide(&mut self, _engine: &dyn GameEngine, _seat: usize) -> Option<Action> {
            Some(self.0)
        }
    }

    #[test]
    fn human_plays_queued_intents_in_order() {
        let mut g = mk_game(2);
        let mut table = AgentTable::for_seats(2);
        table.set_agent(0, Some(Box::new(HumanAgent::new())));
        table.set_agent(1, Some(Box::new(HumanAgent::new())));
        assert!(table.receive(1, Action::Raise(30)));
        assert!(table.receive(0, Action::Call));
        assert!(matches!(table.on_turn(&mut g).unwrap(), TurnOutcome::Acted { seat: 1, .. }));
        assert!(matches!(table.on_turn(&mut g).unwrap(), TurnOutcome::Acted { seat: 0, .. }));
        assert_eq!(g.pot(), 60);
        // nothing queued now
        assert_eq!(table.on_turn(&mut g).unwrap(), TurnOutcome::Idle);
    }

    #[test]
    fn rejected_agent_is_reprompted_then_folded() {
        let mut g = mk_game(3);
        let mut table = AgentTable::for_seats(3);
        g.act(Action::Raise(100)).unwrap();
        table.set_agent(2, Some(Box::new(Stubborn(Action::Raise(5)))));
        for _ in 0..DEFAULT_MAX_REJECTS - 1 {
            let out = table.on_turn(&mut g).unwrap();
            assert!(matches!(out, TurnOutcome::Rejected { seat: 2, .. }));
            assert_eq!(g.awaiting(), Some(2));
        }
        let out = table.on_turn(&mut g).unwrap();
        assert!(matches!(out, TurnOutcome::ForcedFold { seat: 2, .. }));
        assert!(g.players()[2].is_folded());
    }

    #[test]
    fn reject_limit_of_one_folds_at_once() {
        let mut g = mk_game(3);
        let mut table = AgentTable::for_seats(3);
        table.set_max_rejects(1);
        g.act(Action::Raise(100)).unwrap();
        table.set_agent(2, Some(Box::new(Stubborn(Action::Raise(5)))));
        let out = table.on_turn(&mut g).unwrap();
        assert!(matches!(out, TurnOutcome::ForcedFold { seat: 2, .. }));
        assert_eq!(g.awaiting(), Some(0));
    }

    #[test]
    fn seats_without_agents_stay_idle() {
        let mut g = mk_game(3);
        let mut table = AgentTable::for_seats(3);
        assert_eq!(table.on_turn(&mut g).unwrap(), TurnOutcome::Idle);
        assert!(!table.has_agent(1));
        assert_eq!(format!("{table:?}"), "AgentTable(---)");
    }

    #[test]
    fn bots_finish_a_hand() {
        let mut g = mk_game(4);
        let mut table = AgentTable::for_seats(4);
        for seat in 0..4 {
            let profile = BotProfile::for_difficulty(Difficulty::Medium).with_seed(seat as u64);
            table.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
        }
        assert!(table.any_bots());
        table.run_hand(&mut g).unwrap();
        assert!(g.is_hand_over());
        assert!(g.showdown().is_ok());
        let total: u64 = g.players().iter().map(|p| p.stack()).sum();
        assert_eq!(total, 4000);
    }
}
