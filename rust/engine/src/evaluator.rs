//! Pluggable hand-strength evaluation used at showdown.
//!
//! The state machine only depends on [`HandEvaluator`]; which implementation
//! runs is decided by the caller and passed in explicitly.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::{EvalError, GameError};
use crate::hand::{best_five, Category};

/// Totally ordered strength value. Only comparisons between results of the
/// same evaluator are meaningful.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Strength(u32);

impl Strength {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Outcome of evaluating two hole cards against a full board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalResult {
    /// The five cards that make the hand, high to low
    pub best5: [Card; 5],
    pub strength: Strength,
    /// Hand category, when the evaluator ranks categories at all
    pub category: Option<Category>,
}

pub trait HandEvaluator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluates `hole + board` and returns the best five cards and their strength.
    fn evaluate7(&self, hole: &[Card; 2], board: &[Card; 5]) -> Result<EvalResult, EvalError>;
}

fn seven_distinct(hole: &[Card; 2], board: &[Card; 5]) -> Result<[Card; 7], EvalError> {
    let cards = [
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ];
    let mut seen = HashSet::with_capacity(7);
    for c in cards {
        if !seen.insert(c) {
            return Err(EvalError::DuplicateCard(c));
        }
    }
    Ok(cards)
}

/// Standard high-hand ranking: category first, then kickers.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn evaluate7(&self, hole: &[Card; 2], board: &[Card; 5]) -> Result<EvalResult, EvalError> {
        let cards = seven_distinct(hole, board)?;
        let (best5, hs) = best_five(&cards);
        Ok(EvalResult {
            best5,
            strength: Strength(hs.score()),
            category: Some(hs.category),
        })
    }
}

/// Teaching heuristic: the sum of the five highest ranks. Ignores pairs,
/// suits and straights entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighCardEvaluator;

impl HandEvaluator for HighCardEvaluator {
    fn name(&self) -> &'static str {
        "highcard"
    }

    fn evaluate7(&self, hole: &[Card; 2], board: &[Card; 5]) -> Result<EvalResult, EvalError> {
        let mut cards = seven_distinct(hole, board)?;
        // stable, so equal ranks keep their hole-then-board order
        cards.sort_by(|a, b| b.rank.cmp(&a.rank));
        let best5 = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        let score = best5.iter().map(|c| c.rank.value() as u32).sum();
        Ok(EvalResult {
            best5,
            strength: Strength(score),
            category: None,
        })
    }
}

/// Names an evaluator implementation, e.g. from configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Standard,
    #[serde(alias = "fallback")]
    HighCard,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn HandEvaluator> {
        match self {
            EvaluatorKind::Standard => Box::new(StandardEvaluator),
            EvaluatorKind::HighCard => Box::new(HighCardEvaluator),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvaluatorKind::Standard => "standard",
            EvaluatorKind::HighCard => "highcard",
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluatorKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(EvaluatorKind::Standard),
            "highcard" | "fallback" => Ok(EvaluatorKind::HighCard),
            other => Err(GameError::InvalidConfig(format!(
                "unknown evaluator {other:?} (expected standard or highcard)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hole(s: &str) -> [Card; 2] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    fn board(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn standard_ranks_flush_over_high_cards() {
        let ev = StandardEvaluator;
        let b = board("2h 7h Jh 4c 9s");
        let flush = ev.evaluate7(&hole("Qh 3h"), &b).unwrap();
        let aces = ev.evaluate7(&hole("Ac Kd"), &b).unwrap();
        assert_eq!(flush.category, Some(Category::Flush));
        assert!(flush.strength > aces.strength);
        assert_eq!(flush.best5[0].to_string(), "Qh");
    }

    #[test]
    fn standard_detects_board_ties() {
        let ev = StandardEvaluator;
        let b = board("As Ks Qs Js Ts");
        let a = ev.evaluate7(&hole("2c 3d"), &b).unwrap();
        let c = ev.evaluate7(&hole("4c 5d"), &b).unwrap();
        assert_eq!(a.strength, c.strength);
    }

    #[test]
    fn highcard_sums_top_five_ranks() {
        let ev = HighCardEvaluator;
        let r = ev
            .evaluate7(&hole("2c 2d"), &board("As Kd 9h 8c 3s"))
            .unwrap();
        assert_eq!(r.strength.raw(), 14 + 13 + 9 + 8 + 3);
        assert_eq!(r.category, None);
    }

    #[test]
    fn duplicate_cards_are_rejected() {
        let err = StandardEvaluator
            .evaluate7(&hole("As Kd"), &board("As 2c 3d 4h 9s"))
            .unwrap_err();
        assert_eq!(err, EvalError::DuplicateCard("As".parse().unwrap()));
        assert!(HighCardEvaluator
            .evaluate7(&hole("As Kd"), &board("As 2c 3d 4h 9s"))
            .is_err());
    }

    #[test]
    fn kind_parses_names_and_alias() {
        assert_eq!("standard".parse::<EvaluatorKind>().unwrap(), EvaluatorKind::Standard);
        assert_eq!("fallback".parse::<EvaluatorKind>().unwrap(), EvaluatorKind::HighCard);
        assert!("pokerkit".parse::<EvaluatorKind>().is_err());
        assert_eq!(EvaluatorKind::HighCard.build().name(), "highcard");
        let k: EvaluatorKind = serde_json::from_str("\"fallback\"").unwrap();
        assert_eq!(k, EvaluatorKind::HighCard);
    }
}
