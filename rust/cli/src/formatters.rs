//! Plain-text rendering of cards, legal actions and hand events.
//!
//! Cards print as their two-character tokens (`As`, `Td`) so terminal output
//! can be pasted back into tools that read card lists.
//!
//! ```rust
//! use hucoach_engine::cards::parse_cards;
//! use hucoach_cli::formatters::format_board;
//!
//! let flop = parse_cards("As Kh Qd").unwrap();
//! assert_eq!(format_board(&flop), "[As Kh Qd]");
//! assert_eq!(format_board(&[]), "[]");
//! ```

use hucoach_engine::cards::Card;
use hucoach_engine::events::HandEvent;
use hucoach_engine::rules::{AllInAs, LegalAction};

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_board(cards: &[Card]) -> String {
    format!("[{}]", format_cards(cards))
}

/// One legal action with its window, e.g. `bet 2..200` or `call 1`.
pub fn format_legal(la: &LegalAction) -> String {
    match (la.min, la.max, la.to_call) {
        (Some(min), Some(max), _) if la.action.is_sized() => {
            format!("{} {}..{}", la.action, min, max)
        }
        (Some(push), _, _) => format!("{} {}", la.action, push),
        (None, None, Some(amt)) => format!("{} {}", la.action, amt),
        _ => la.action.to_string(),
    }
}

pub fn format_legal_list(legal: &[LegalAction]) -> String {
    legal.iter().map(format_legal).collect::<Vec<_>>().join(", ")
}

fn seat(who: usize) -> String {
    format!("P{}", who + 1)
}

/// A single narration line for `event`.
pub fn format_event(event: &HandEvent) -> String {
    match event {
        HandEvent::Blind { who, amt } => format!("{} posts {}", seat(*who), amt),
        HandEvent::DealHole { .. } => "hole cards dealt".to_string(),
        HandEvent::Board { street, cards } => format!("{}: {}", street, format_board(cards)),
        HandEvent::Check { who } => format!("{} checks", seat(*who)),
        HandEvent::Call { who, amt, refund } => match refund {
            Some(r) => format!("{} calls {} ({} returned)", seat(*who), amt, r),
            None => format!("{} calls {}", seat(*who), amt),
        },
        HandEvent::Bet { who, amt } => format!("{} bets {}", seat(*who), amt),
        HandEvent::Raise { who, inc, to, .. } => {
            format!("{} raises {} to {}", seat(*who), inc, to)
        }
        HandEvent::AllIn { who, amt, resolved } => {
            let kind = match resolved {
                AllInAs::Bet => "bet",
                AllInAs::Raise { .. } => "raise",
                AllInAs::Call => "call",
                AllInAs::ShortCall { .. } => "short call",
            };
            format!("{} is all-in for {} ({})", seat(*who), amt, kind)
        }
        HandEvent::Fold { who } => format!("{} folds", seat(*who)),
        HandEvent::WinFold { who, amt } => format!("{} wins {} uncontested", seat(*who), amt),
        HandEvent::Showdown { best5, .. } => format!(
            "showdown: P1 {} vs P2 {}",
            format_board(&best5[0]),
            format_board(&best5[1])
        ),
        HandEvent::WinShowdown { who, amt } => format!("{} wins {} at showdown", seat(*who), amt),
        HandEvent::Split { amts } => format!("pot split {} / {}", amts[0], amts[1]),
        HandEvent::Uncalled { who, amt } => format!("{} gets {} back uncalled", seat(*who), amt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hucoach_engine::player::ActionKind;

    #[test]
    fn legal_windows() {
        let bet = LegalAction {
            action: ActionKind::Bet,
            min: Some(2),
            max: Some(198),
            to_call: None,
        };
        assert_eq!(format_legal(&bet), "bet 2..198");
        let call = LegalAction {
            action: ActionKind::Call,
            min: None,
            max: None,
            to_call: Some(1),
        };
        assert_eq!(format_legal(&call), "call 1");
        let fold = LegalAction {
            action: ActionKind::Fold,
            min: None,
            max: None,
            to_call: None,
        };
        assert_eq!(format_legal_list(&[fold, call]), "fold, call 1");
    }

    #[test]
    fn events_read_as_sentences() {
        assert_eq!(
            format_event(&HandEvent::Raise {
                who: 1,
                inc: 4,
                to: 6,
                reopens: true
            }),
            "P2 raises 4 to 6"
        );
        assert_eq!(
            format_event(&HandEvent::Call {
                who: 0,
                amt: 28,
                refund: Some(72)
            }),
            "P1 calls 28 (72 returned)"
        );
        assert_eq!(format_event(&HandEvent::Split { amts: [2, 3] }), "pot split 2 / 3");
    }
}
