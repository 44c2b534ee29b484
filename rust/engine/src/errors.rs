use thiserror::Error;

use crate::cards::Card;
use crate::player::ActionKind;

/// Errors surfaced by the hand engine. A rejected operation never produces a
/// state, so the caller's previous [`crate::game::GameState`] stays valid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal action: {action} (legal: {legal:?})")]
    IllegalAction {
        action: ActionKind,
        legal: Vec<ActionKind>,
    },
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Hand is at showdown and must be settled first")]
    ShowdownPending,
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("seat {seat} has {stack} chips, cannot post blind of {blind}")]
    InsufficientBlind { seat: usize, stack: u32, blind: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("last hand is not complete")]
    HandNotComplete,
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
    #[error("invalid game state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

/// Errors raised by a hand-strength evaluator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("duplicate card {0} in evaluated hand")]
    DuplicateCard(Card),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid card token: {0:?}")]
pub struct CardParseError(pub String);
