//! holdem-rs: single-table Texas Hold'em.
//!
//! - [`evaluator`]: best five-card category from 5 to 7 cards, decided by an ordered
//!   chain of category detectors
//! - [`betting`]: the betting-round state machine (check, call, raise, fold, all in)
//! - [`game`]: one table owning the deck, the board and the betting state; deals
//!   streets as rounds complete and settles the pot at showdown
//! - [`agents`] and [`tui`]: bots, queued human input and a Ratatui front end
//!
//! No panics for invalid input; recoverable errors come back as `Result`.
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_rs::evaluator::{evaluate_holdem, Category};
//! use holdem_rs::hand::{CommunityCards, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let board: CommunityCards = "Kc Qd Jh 3s 2c".parse().unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! assert_eq!(eval.label(), "Pair");
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_rs::action::Action;
//! use holdem_rs::config::TableConfig;
//! use holdem_rs::game::Game;
//!
//! let mut game = Game::new(TableConfig::with_players(2, 100).with_seed(1)).unwrap();
//! game.new_hand().unwrap();
//! game.act(Action::Raise(20)).unwrap();
//! game.act(Action::Fold).unwrap();
//! assert!(game.is_hand_over());
//! // the raise is the whole pot and goes straight back to the raiser
//! let showdown = game.showdown().unwrap();
//! assert!(showdown.uncontested);
//! assert_eq!(showdown.winners, vec![1]);
//! assert_eq!(showdown.pot, 20);
//! assert_eq!(game.players()[1].stack(), 100);
//! ```
//!
//! ## TUI
//! Run the interactive TUI, or bot-only hands without it:
//! ```sh
//! cargo run --bin holdem
//! cargo run --bin holdem -- --auto --hands 5 --seed 7
//! ```

pub mod action;
pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
