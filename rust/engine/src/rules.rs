use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::{GameState, Street};
use crate::player::ActionKind;

/// How an `allin` push is interpreted, fixed once when the action is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllInAs {
    /// Opens the street with the whole stack
    Bet,
    /// Raises over the current bet; a short increment does not reopen action
    Raise { increment: u32, reopens: bool },
    /// Exactly covers the amount to call
    Call,
    /// Falls short of the amount to call; the opponent gets `refund` back
    ShortCall { refund: u32 },
}

/// An action resolved against a state, with every chip amount decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// `pay` leaves the stack; `refund` returns to the opponent when `pay` is short
    Call { pay: u32, refund: u32 },
    Bet { amount: u32 },
    /// `put` = to_call + `increment`
    Raise {
        put: u32,
        increment: u32,
        reopens: bool,
    },
    AllIn { push: u32, resolved: AllInAs },
}

/// One entry of the structured legal-action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    pub action: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_call: Option<u32>,
}

impl LegalAction {
    fn bare(action: ActionKind) -> Self {
        Self {
            action,
            min: None,
            max: None,
            to_call: None,
        }
    }
}

/// Chips `actor` must add to match the opponent's street investment.
pub fn to_call(gs: &GameState, actor: usize) -> u32 {
    gs.players[1 - actor]
        .invested_street
        .saturating_sub(gs.players[actor].invested_street)
}

/// Preflop, blinds just matched, big blind to act: the blind itself is the bet
/// being raised.
fn blind_raise_option(gs: &GameState, actor: usize) -> bool {
    gs.street == Street::Preflop
        && gs.open_bet
        && gs.last_bet == gs.bb
        && actor == gs.big_blind_seat()
        && to_call(gs, actor) == 0
}

/// Action names legal for the seat to act, in a fixed order
/// (fold, check, call, bet, raise, allin).
pub fn legal_actions(gs: &GameState) -> Vec<ActionKind> {
    let actor = match gs.to_act {
        Some(a) if !gs.street.is_terminal() => a,
        _ => return vec![],
    };
    let me = &gs.players[actor];
    let opp = &gs.players[1 - actor];
    if !me.can_act() {
        return vec![];
    }
    let tc = to_call(gs, actor);

    if opp.all_in {
        // nobody left to respond to a raise
        return if tc == 0 {
            vec![]
        } else {
            vec![ActionKind::Fold, ActionKind::Call]
        };
    }

    let mut out = Vec::with_capacity(4);
    if tc == 0 {
        out.push(ActionKind::Check);
        if me.stack > 0 {
            if !gs.open_bet {
                out.push(ActionKind::Bet);
                out.push(ActionKind::AllIn);
            } else if blind_raise_option(gs, actor) {
                out.push(ActionKind::Raise);
                out.push(ActionKind::AllIn);
            }
        }
    } else {
        out.push(ActionKind::Fold);
        if me.stack > 0 {
            out.push(ActionKind::Call);
        }
        if me.stack > tc {
            out.push(ActionKind::Raise);
        }
        if me.stack > 0 {
            out.push(ActionKind::AllIn);
        }
    }
    out
}

/// Smallest raise increment that reopens action this street.
fn min_raise_increment(gs: &GameState) -> u32 {
    gs.last_raise_size.max(1)
}

/// Clamps a requested raise increment to what the actor can afford.
fn raise_increment(gs: &GameState, max_add: u32, requested: Option<u32>) -> (u32, bool) {
    let min_inc = min_raise_increment(gs);
    let increment = requested.unwrap_or(min_inc).max(min_inc).min(max_add);
    (increment, increment >= min_inc)
}

/// Resolves `action` against `gs` without producing a new state.
///
/// This is the single source of truth for what an action does: the state
/// machine executes the returned [`ValidatedAction`] and the legal-window
/// search queries it as an oracle. Sizing follows the clamping rules of the
/// betting model: a bet is floored at the big blind and capped at the stack;
/// a raise `amount` is the increment, floored at the minimum raise and capped
/// at the stack.
///
/// # Errors
///
/// - [`GameError::HandAlreadyComplete`] / [`GameError::ShowdownPending`] on a
///   terminal street
/// - [`GameError::InsufficientChips`] for an all-in with an empty stack
/// - [`GameError::IllegalAction`] when `action` is not in [`legal_actions`]
///
/// # Examples
///
/// ```
/// use hucoach_engine::game::{start_hand, HandConfig};
/// use hucoach_engine::player::ActionKind;
/// use hucoach_engine::rules::{validate_action, ValidatedAction};
///
/// let gs = start_hand(&HandConfig::default(), "s1", "h1", 0, Some(7)).unwrap();
/// // the button faces the big blind: completing costs one chip
/// assert_eq!(
///     validate_action(&gs, ActionKind::Call, None),
///     Ok(ValidatedAction::Call { pay: 1, refund: 0 })
/// );
/// // raise amounts are increments, floored at the last raise size
/// assert_eq!(
///     validate_action(&gs, ActionKind::Raise, Some(1)),
///     Ok(ValidatedAction::Raise { put: 3, increment: 2, reopens: true })
/// );
/// assert!(validate_action(&gs, ActionKind::Check, None).is_err());
/// ```
pub fn validate_action(
    gs: &GameState,
    action: ActionKind,
    amount: Option<u32>,
) -> Result<ValidatedAction, GameError> {
    match gs.street {
        Street::Complete => return Err(GameError::HandAlreadyComplete),
        Street::Showdown => return Err(GameError::ShowdownPending),
        _ => {}
    }
    if action == ActionKind::AllIn {
        if let Some(actor) = gs.to_act {
            if gs.players[actor].stack == 0 {
                return Err(GameError::InsufficientChips);
            }
        }
    }
    let legal = legal_actions(gs);
    if !legal.contains(&action) {
        return Err(GameError::IllegalAction { action, legal });
    }
    let actor = gs
        .to_act
        .ok_or_else(|| GameError::InvalidState("no seat to act".into()))?;
    let me = &gs.players[actor];
    let opp = &gs.players[1 - actor];
    let tc = to_call(gs, actor);

    let validated = match action {
        ActionKind::Fold => ValidatedAction::Fold,
        ActionKind::Check => ValidatedAction::Check,
        ActionKind::Call => {
            let pay = me.stack.min(tc);
            let refund = (tc - pay).min(opp.invested_street);
            ValidatedAction::Call { pay, refund }
        }
        ActionKind::Bet => ValidatedAction::Bet {
            amount: amount.unwrap_or(gs.bb).max(gs.bb).min(me.stack),
        },
        ActionKind::Raise => {
            let (increment, reopens) = raise_increment(gs, me.stack - tc, amount);
            ValidatedAction::Raise {
                put: tc + increment,
                increment,
                reopens,
            }
        }
        ActionKind::AllIn => {
            let push = me.stack;
            let resolved = if tc == 0 && !gs.open_bet {
                AllInAs::Bet
            } else if blind_raise_option(gs, actor) {
                let (increment, reopens) = raise_increment(gs, push, Some(push));
                AllInAs::Raise { increment, reopens }
            } else if push < tc {
                AllInAs::ShortCall {
                    refund: (tc - push).min(opp.invested_street),
                }
            } else if push == tc {
                AllInAs::Call
            } else {
                let (increment, reopens) = raise_increment(gs, push - tc, Some(push - tc));
                AllInAs::Raise { increment, reopens }
            };
            ValidatedAction::AllIn { push, resolved }
        }
    };
    Ok(validated)
}

fn accepts(gs: &GameState, action: ActionKind, amount: u32) -> bool {
    validate_action(gs, action, Some(amount)).is_ok()
}

fn search_min(gs: &GameState, action: ActionKind, mut lo: u32, mut hi: u32) -> Option<u32> {
    let mut found = None;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        if accepts(gs, action, mid) {
            found = Some(mid);
            if mid == 0 {
                break;
            }
            hi = mid - 1;
        } else {
            lo = mid + 1;
        }
    }
    found
}

fn search_max(gs: &GameState, action: ActionKind, mut lo: u32, mut hi: u32) -> Option<u32> {
    let mut found = None;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        if accepts(gs, action, mid) {
            found = Some(mid);
            lo = mid + 1;
        } else {
            if mid == 0 {
                break;
            }
            hi = mid - 1;
        }
    }
    found
}

/// Structured legal actions: `call` carries `to_call`, `bet`/`raise` carry the
/// accepted `[min, max]` window, `allin` carries the whole stack as both bounds.
///
/// Windows are found by binary search over `[max(1, bb), stack]` with
/// [`validate_action`] as the oracle. A sized action whose domain is empty is
/// left out; `allin` still covers that push.
///
/// Every amount inside the window is accepted. Amounts outside it
/// are not refused either: [`validate_action`] clamps them to the nearest bound.
pub fn legal_actions_struct(gs: &GameState) -> Vec<LegalAction> {
    let names = legal_actions(gs);
    let Some(actor) = gs.to_act else {
        return vec![];
    };
    let stack = gs.players[actor].stack;
    let tc = to_call(gs, actor);

    let mut out = Vec::with_capacity(names.len());
    for action in names {
        match action {
            ActionKind::Fold | ActionKind::Check => out.push(LegalAction::bare(action)),
            ActionKind::Call => out.push(LegalAction {
                to_call: Some(tc),
                ..LegalAction::bare(action)
            }),
            ActionKind::Bet | ActionKind::Raise => {
                let lo = gs.bb.max(1);
                let window = search_min(gs, action, lo, stack)
                    .zip(search_max(gs, action, lo, stack));
                if let Some((min, max)) = window {
                    if min <= max {
                        out.push(LegalAction {
                            min: Some(min),
                            max: Some(max),
                            ..LegalAction::bare(action)
                        });
                    }
                }
            }
            ActionKind::AllIn => out.push(LegalAction {
                min: Some(stack),
                max: Some(stack),
                ..LegalAction::bare(action)
            }),
        }
    }
    out
}
