use crate::action::{Action, ActionError};
use crate::betting::Street;
use crate::cards::Card;
use crate::engine::GameEngine;
use crate::evaluator::{evaluate_cards, Category};
use crate::hand::{CommunityCards, HoleCards};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::{AgentKind, PlayerAgent};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff) = match difficulty {
            Difficulty::Easy => (0.3, 0.2, 0.03),
            Difficulty::Medium => (0.5, 0.35, 0.05),
            Difficulty::Hard => (0.62, 0.5, 0.08),
        };
        Self { difficulty, tightness, aggression, bluff, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// What the bot sees of the table when deciding.
struct BotContext<'a> {
    street: Street,
    to_call: u64,
    pot: u64,
    round_bet: u64,
    /// Uncommitted chips: the stack at the start of the round.
    stack: u64,
    hole: &'a HoleCards,
    board: &'a CommunityCards,
}

struct BotPolicy;

impl BotPolicy {
    fn decide(ctx: &BotContext<'_>, profile: &BotProfile, state: &mut BotState) -> Action {
        let strength = estimate_strength(ctx.hole, ctx.board);
        let mistake_rate = match profile.difficulty {
            Difficulty::Easy => 0.28,
            Difficulty::Medium => 0.14,
            Difficulty::Hard => 0.06,
        };
        let noise = state.rng.random_range(-1.0..=1.0) * mistake_rate * 0.2;
        let adjusted = (strength + noise).clamp(0.0, 1.0);

        let pot_odds = if ctx.to_call == 0 {
            0.0
        } else {
            ctx.to_call as f64 / (ctx.pot + ctx.round_bet + ctx.to_call) as f64
        };
        let fold_threshold = (0.3 + profile.tightness * 0.3 - (0.25 - pot_odds) * 0.2).clamp(0.1, 0.9);
        let raise_threshold = (0.7 - profile.aggression * 0.25).clamp(0.2, 0.9);
        let wants_raise =
            adjusted > raise_threshold && state.rng.random::<f64>() < profile.aggression + 0.3;

        if ctx.to_call > 0 {
            // can't cover the level: shove or let go
            if ctx.stack < ctx.round_bet {
                return if adjusted > raise_threshold { Action::AllIn } else { Action::Fold };
            }
            if (adjusted < fold_threshold && ctx.street != Street::Preflop) || adjusted < 0.15 {
                return Action::Fold;
            }
            if wants_raise {
                return raise_or_shove(ctx, adjusted);
            }
            return Action::Call;
        }

        if wants_raise || state.rng.random::<f64>() < profile.bluff {
            return raise_or_shove(ctx, adjusted);
        }
        Action::Check
    }
}

/// Pick a raise above the level sized to the pot; all in when the stack is short.
fn raise_or_shove(ctx: &BotContext<'_>, strength: f64) -> Action {
    let base = (ctx.pot + ctx.round_bet).max(10) as f64;
    let factor = if strength > 0.85 { 1.0 } else { 0.5 };
    let target = ctx.round_bet + (base * factor).round() as u64;
    if target >= ctx.stack {
        return Action::AllIn;
    }
    Action::Raise(target)
}

fn estimate_strength(hole: &HoleCards, board: &CommunityCards) -> f64 {
    let mut cards: Vec<Card> = hole.as_array().to_vec();
    cards.extend_from_slice(board.as_slice());
    match evaluate_cards(&cards) {
        Ok(eval) => {
            let base = eval.category.ordinal() as f64 / Category::RoyalFlush.ordinal() as f64;
            let high = eval.best_five[0].rank().high_value() as f64 / 14.0;
            let mut strength = 0.25 + base * 0.7 + high * 0.05;
            if eval.category == Category::HighCard {
                strength = high * 0.3;
            }
            strength.min(1.0)
        }
        Err(_) => preflop_strength(hole),
    }
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = hole.first().rank().high_value() as f64;
    let b = hole.second().rank().high_value() as f64;
    let (high, low) = if a >= b { (a, b) } else { (b, a) };
    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if a == b {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if hole.first().suit() == hole.second().suit() {
        score += 0.05;
    }
    match (high - low) as i32 {
        1 => score += 0.05,
        2 => score += 0.02,
        g if g > 4 => score -= 0.05,
        _ => {}
    }
    score.clamp(0.0, 1.0)
}

/// A seeded, difficulty-tuned bot.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    rejected: u32,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, rejected: 0 }
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn decide(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<Action> {
        if engine.awaiting() != Some(seat) {
            return None;
        }
        let hole = engine.hole_cards(seat)?;
        let ctx = BotContext {
            street: engine.street(),
            to_call: engine.to_call(seat),
            pot: engine.pot(),
            round_bet: engine.round_bet(),
            stack: engine.stack(seat),
            hole: &hole,
            board: engine.board(),
        };
        if self.rejected > 0 {
            // fall back to the plainest legal move
            self.rejected = 0;
            return Some(if ctx.to_call == 0 { Action::Check } else { Action::Fold });
        }
        Some(BotPolicy::decide(&ctx, &self.profile, &mut self.state))
    }

    fn rejected(&mut self, _reason: &ActionError) {
        self.rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        hole: &'a HoleCards,
        board: &'a CommunityCards,
        to_call: u64,
        round_bet: u64,
        stack: u64,
    ) -> BotContext<'a> {
        BotContext { street: Street::Flop, to_call, pot: 100, round_bet, stack, hole, board }
    }

    fn passive() -> BotProfile {
        BotProfile { aggression: 0.0, bluff: 0.0, ..BotProfile::for_difficulty(Difficulty::Hard) }
    }

    #[test]
    fn preflop_pairs_beat_trash() {
        let aa: HoleCards = "As Ah".parse().unwrap();
        let trash: HoleCards = "7c 2d".parse().unwrap();
        assert!(preflop_strength(&aa) > preflop_strength(&trash));
    }

    #[test]
    fn made_hands_are_stronger_than_air() {
        let board: CommunityCards = "Kd 9s 4h".parse().unwrap();
        let set: HoleCards = "Kc Kh".parse().unwrap();
        let air: HoleCards = "7c 2d".parse().unwrap();
        assert!(estimate_strength(&set, &board) > estimate_strength(&air, &board));
    }

    #[test]
    fn never_checks_facing_a_bet() {
        let hole: HoleCards = "Qc 8d".parse().unwrap();
        let board: CommunityCards = "2s 5h Jd".parse().unwrap();
        let mut state = BotState::new(Some(7));
        for _ in 0..50 {
            let a = BotPolicy::decide(&ctx(&hole, &board, 20, 20, 500), &passive(), &mut state);
            assert_ne!(a, Action::Check);
        }
    }

    #[test]
    fn raises_stay_legal() {
        let hole: HoleCards = "Ac Ad".parse().unwrap();
        let board: CommunityCards = "As Kd 2c".parse().unwrap();
        let profile = BotProfile::for_difficulty(Difficulty::Hard).with_seed(3);
        let mut state = BotState::new(profile.rng_seed);
        for _ in 0..50 {
            match BotPolicy::decide(&ctx(&hole, &board, 40, 40, 300), &profile, &mut state) {
                Action::Raise(n) => assert!(n > 40 && n < 300),
                Action::Call | Action::AllIn => {}
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn short_stack_shoves_or_folds() {
        let hole: HoleCards = "9c 8d".parse().unwrap();
        let board: CommunityCards = "As Kd 2c".parse().unwrap();
        let mut state = BotState::new(Some(1));
        let a = BotPolicy::decide(&ctx(&hole, &board, 200, 200, 50), &passive(), &mut state);
        assert!(matches!(a, Action::AllIn | Action::Fold));
    }
}
