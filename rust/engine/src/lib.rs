//! # hucoach-engine: Heads-Up No-Limit Hold'em hand engine
//!
//! A deterministic betting engine for one heads-up hand at a time: it deals
//! from a seeded deck, derives the legal actions (with bet/raise windows),
//! applies decisions with full NLHE edge cases (short all-ins, the big
//! blind's option, all-in run-outs) and settles by fold or showdown.
//!
//! Every operation is a pure function from a [`game::GameState`] to a new
//! one. Nothing here does I/O except [`logger::HandLogger`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card tokens, ranks, suits and the canonical deck order
//! - [`deck`] - Seeded ChaCha20 shuffling
//! - [`game`] - Hand state, configuration and hand start
//! - [`rules`] - Legal actions, sizing windows and action validation
//! - [`engine`] - Applying actions and settling hands
//! - [`events`] - The per-hand event log
//! - [`hand`] / [`evaluator`] - Hand ranking behind a pluggable evaluator
//! - [`session`] - Planning the next hand of a session
//! - [`logger`] - Hand records, JSONL output and replay
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use hucoach_engine::engine::{apply_action, settle_if_needed};
//! use hucoach_engine::evaluator::StandardEvaluator;
//! use hucoach_engine::game::{start_hand, HandConfig, Street};
//! use hucoach_engine::player::ActionKind;
//!
//! let cfg = HandConfig::default();
//! let mut gs = start_hand(&cfg, "session-1", "hand-1", 0, Some(42)).unwrap();
//! gs = apply_action(&gs, ActionKind::Call, None).unwrap();
//! // check it down
//! while !gs.street.is_terminal() {
//!     gs = apply_action(&gs, ActionKind::Check, None).unwrap();
//! }
//! let done = settle_if_needed(&gs, &StandardEvaluator).unwrap();
//! assert_eq!(done.street, Street::Complete);
//! assert_eq!(done.stacks().iter().sum::<u32>(), 400);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod session;

pub use engine::{apply_action, settle_if_needed};
pub use errors::GameError;
pub use game::{start_hand, start_hand_with_carry, GameState, HandConfig, Street};
pub use rules::{legal_actions, legal_actions_struct};
