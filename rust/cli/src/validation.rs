//! Input parsing for the interactive `play` command.

use hucoach_engine::player::ActionKind;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid action with its optional amount (bet total or raise increment)
    Action(ActionKind, Option<u32>),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into an action or the quit command.
///
/// Accepts (case-insensitive): `f`/`fold`, `c`/`check`, `call`,
/// `bet <amount>`, `raise <increment>`, `allin`/`all-in`, `q`/`quit`.
///
/// # Example
///
/// ```rust
/// # use hucoach_cli::validation::{parse_player_action, ParseResult};
/// use hucoach_engine::player::ActionKind;
///
/// assert_eq!(
///     parse_player_action("bet 10"),
///     ParseResult::Action(ActionKind::Bet, Some(10))
/// );
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    if verb == "q" || verb == "quit" {
        return ParseResult::Quit;
    }

    let action = match verb {
        "fold" | "f" => ActionKind::Fold,
        "check" | "c" => ActionKind::Check,
        other => match other.parse::<ActionKind>() {
            Ok(a) => a,
            Err(_) => {
                return ParseResult::Invalid(format!(
                    "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, allin, q",
                    verb
                ));
            }
        },
    };

    if !action.is_sized() {
        if parts.len() > 1 {
            return ParseResult::Invalid(format!("{} takes no amount", action));
        }
        return ParseResult::Action(action, None);
    }

    let Some(raw) = parts.get(1) else {
        return ParseResult::Invalid(format!(
            "{} requires an amount (e.g., '{} 10')",
            action, action
        ));
    };
    match raw.parse::<u32>() {
        Ok(amount) if amount > 0 => ParseResult::Action(action, Some(amount)),
        Ok(_) => ParseResult::Invalid(format!("{} amount must be positive", action)),
        Err(_) => ParseResult::Invalid(format!("Invalid {} amount", action)),
    }
}
