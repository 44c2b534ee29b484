use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::player::ActionKind;
use crate::rules::AllInAs;

/// One entry of a hand's audit trail. Serialized with a `"t"` tag so a log
/// line reads like `{"t":"bet","who":1,"amt":6}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum HandEvent {
    Blind {
        who: usize,
        amt: u32,
    },
    DealHole {
        p0: [Card; 2],
        p1: [Card; 2],
    },
    /// Cards dealt so far once a street opens
    Board {
        street: Street,
        cards: Vec<Card>,
    },
    Check {
        who: usize,
    },
    Call {
        who: usize,
        amt: u32,
        /// Chips handed back to the opponent after a short call
        #[serde(default, skip_serializing_if = "Option::is_none")]
        refund: Option<u32>,
    },
    Bet {
        who: usize,
        amt: u32,
    },
    Raise {
        who: usize,
        inc: u32,
        /// Street investment after the raise
        to: u32,
        reopens: bool,
    },
    #[serde(rename = "allin")]
    AllIn {
        who: usize,
        amt: u32,
        #[serde(rename = "as")]
        resolved: AllInAs,
    },
    Fold {
        who: usize,
    },
    WinFold {
        who: usize,
        amt: u32,
    },
    Showdown {
        winner: Option<usize>,
        is_tie: bool,
        /// Best five cards per seat, seat 0 first
        best5: [[Card; 5]; 2],
        board: Vec<Card>,
    },
    WinShowdown {
        who: usize,
        amt: u32,
    },
    Split {
        amts: [u32; 2],
    },
    /// Blind excess returned when the other blind is all-in
    Uncalled {
        who: usize,
        amt: u32,
    },
}

impl HandEvent {
    /// The player decision this event records, as `(seat, action, amount)`
    /// suitable for feeding back into `apply_action`.
    pub fn replay_action(&self) -> Option<(usize, ActionKind, Option<u32>)> {
        match *self {
            HandEvent::Check { who } => Some((who, ActionKind::Check, None)),
            HandEvent::Call { who, .. } => Some((who, ActionKind::Call, None)),
            HandEvent::Bet { who, amt } => Some((who, ActionKind::Bet, Some(amt))),
            HandEvent::Raise { who, inc, .. } => Some((who, ActionKind::Raise, Some(inc))),
            HandEvent::AllIn { who, .. } => Some((who, ActionKind::AllIn, None)),
            HandEvent::Fold { who } => Some((who, ActionKind::Fold, None)),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            HandEvent::Blind { .. } => "blind",
            HandEvent::DealHole { .. } => "deal_hole",
            HandEvent::Board { .. } => "board",
            HandEvent::Check { .. } => "check",
            HandEvent::Call { .. } => "call",
            HandEvent::Bet { .. } => "bet",
            HandEvent::Raise { .. } => "raise",
            HandEvent::AllIn { .. } => "allin",
            HandEvent::Fold { .. } => "fold",
            HandEvent::WinFold { .. } => "win_fold",
            HandEvent::Showdown { .. } => "showdown",
            HandEvent::WinShowdown { .. } => "win_showdown",
            HandEvent::Split { .. } => "split",
            HandEvent::Uncalled { .. } => "uncalled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_use_short_tags() {
        let e = HandEvent::Call {
            who: 1,
            amt: 4,
            refund: None,
        };
        assert_eq!(
            serde_json::to_string(&e).unwrap(),
            r#"{"t":"call","who":1,"amt":4}"#
        );
        let e = HandEvent::AllIn {
            who: 0,
            amt: 50,
            resolved: AllInAs::Bet,
        };
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"t":"allin","who":0,"amt":50,"as":{"kind":"bet"}}"#);
        let back: HandEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
        assert_eq!(back.tag(), "allin");
    }

    #[test]
    fn only_decisions_replay() {
        let raise = HandEvent::Raise {
            who: 0,
            inc: 4,
            to: 6,
            reopens: true,
        };
        assert_eq!(raise.replay_action(), Some((0, ActionKind::Raise, Some(4))));
        assert_eq!(HandEvent::Blind { who: 0, amt: 1 }.replay_action(), None);
        assert_eq!(
            HandEvent::WinFold { who: 1, amt: 3 }.replay_action(),
            None
        );
    }
}
