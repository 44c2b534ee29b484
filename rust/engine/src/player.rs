use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Represents a player's role in heads-up poker for the current hand.
/// Button posts the small blind, BigBlind posts the big blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Position {
    /// Button position (small blind in heads-up)
    Button,
    /// Big blind position
    BigBlind,
}

/// The six action names a player can submit. Sizing, when relevant, travels
/// separately as an optional amount.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if nothing to call)
    Check,
    /// Match the opponent's street investment
    Call,
    /// Open the betting on a street; amount is the chips put in
    Bet,
    /// Raise over the current bet; amount is the raise increment
    Raise,
    /// Push the whole remaining stack
    #[serde(rename = "allin")]
    AllIn,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Bet,
        ActionKind::Raise,
        ActionKind::AllIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "allin",
        }
    }

    pub fn is_sized(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "check" => Ok(ActionKind::Check),
            "call" => Ok(ActionKind::Call),
            "bet" => Ok(ActionKind::Bet),
            "raise" => Ok(ActionKind::Raise),
            "allin" | "all-in" => Ok(ActionKind::AllIn),
            _ => Err(GameError::UnknownAction(s.to_string())),
        }
    }
}

/// One seat's chips and cards for the current hand.
///
/// `Player` is a value: chip movements return a new `Player` rather than
/// editing one in place.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Chips not yet committed this hand
    pub stack: u32,
    /// Hole cards
    pub hole: [Card; 2],
    /// Chips committed during the current betting round
    pub invested_street: u32,
    /// Set once a committing action empties the stack
    pub all_in: bool,
    /// Terminal for this player for the rest of the hand
    pub folded: bool,
}

impl Player {
    pub fn new(stack: u32, hole: [Card; 2]) -> Self {
        Self {
            stack,
            hole,
            invested_street: 0,
            all_in: false,
            folded: false,
        }
    }

    /// Moves `amount` from the stack into this street's investment.
    pub(crate) fn commit(self, amount: u32) -> Player {
        debug_assert!(amount <= self.stack, "commit exceeds stack");
        let stack = self.stack - amount;
        Player {
            stack,
            invested_street: self.invested_street + amount,
            all_in: self.all_in || stack == 0,
            ..self
        }
    }

    /// Returns `amount` of this street's investment to the stack.
    pub(crate) fn refund(self, amount: u32) -> Player {
        debug_assert!(amount <= self.invested_street, "refund exceeds investment");
        let stack = self.stack + amount;
        Player {
            stack,
            invested_street: self.invested_street - amount,
            all_in: self.all_in && stack == 0,
            ..self
        }
    }

    pub(crate) fn fold(self) -> Player {
        Player {
            folded: true,
            ..self
        }
    }

    pub(crate) fn win(self, amount: u32) -> Player {
        Player {
            stack: self.stack + amount,
            ..self
        }
    }

    pub(crate) fn sweep(self) -> Player {
        Player {
            invested_street: 0,
            ..self
        }
    }

    /// True when the player can still make decisions this hand.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }
}
