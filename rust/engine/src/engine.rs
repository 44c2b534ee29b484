use std::cmp::Ordering;

use tracing::{debug, info};

use crate::cards::Card;
use crate::errors::GameError;
use crate::evaluator::HandEvaluator;
use crate::events::HandEvent;
use crate::game::{GameState, Street};
use crate::player::ActionKind;
use crate::rules::{validate_action, AllInAs, ValidatedAction};

/// Applies one player decision and returns the resulting state.
///
/// The action must be in [`crate::rules::legal_actions`] for the seat to
/// act; `amount` is the bet size for `bet` and the raise increment for
/// `raise`, and is ignored otherwise. On error `gs` is untouched and remains
/// the current state.
///
/// # Examples
///
/// ```
/// use hucoach_engine::engine::apply_action;
/// use hucoach_engine::game::{start_hand, HandConfig, Street};
/// use hucoach_engine::player::ActionKind;
///
/// let gs = start_hand(&HandConfig::default(), "s1", "h1", 0, Some(42)).unwrap();
/// let gs = apply_action(&gs, ActionKind::Call, None).unwrap();
/// let gs = apply_action(&gs, ActionKind::Check, None).unwrap();
/// assert_eq!(gs.street, Street::Flop);
/// assert_eq!(gs.pot, 4);
/// assert_eq!(gs.to_act, Some(1));
/// ```
pub fn apply_action(
    gs: &GameState,
    action: ActionKind,
    amount: Option<u32>,
) -> Result<GameState, GameError> {
    let validated = match validate_action(gs, action, amount) {
        Ok(v) => v,
        Err(e) => {
            debug!(hand_id = %gs.hand_id, %action, ?amount, error = %e, "action rejected");
            return Err(e);
        }
    };
    let actor = gs
        .to_act
        .ok_or_else(|| GameError::InvalidState("no seat to act".into()))?;

    let mut next = gs.clone();
    match validated {
        ValidatedAction::Fold => {
            next.players[actor] = next.players[actor].fold();
            next.events.push(HandEvent::Fold { who: actor });
            settle_fold(&mut next, 1 - actor);
            debug_assert_eq!(next.total_chips(), next.starting_total());
            return Ok(next);
        }
        ValidatedAction::Check => {
            next.checks_in_round += 1;
            next.events.push(HandEvent::Check { who: actor });
        }
        ValidatedAction::Call { pay, refund } => {
            next.pay_call(actor, pay, refund);
            next.events.push(HandEvent::Call {
                who: actor,
                amt: pay,
                refund: (refund > 0).then_some(refund),
            });
        }
        ValidatedAction::Bet { amount } => {
            next.open_with_bet(actor, amount);
            next.events.push(HandEvent::Bet {
                who: actor,
                amt: amount,
            });
        }
        ValidatedAction::Raise {
            put,
            increment,
            reopens,
        } => {
            next.raise(actor, put, increment, reopens);
            next.events.push(HandEvent::Raise {
                who: actor,
                inc: increment,
                to: next.players[actor].invested_street,
                reopens,
            });
        }
        ValidatedAction::AllIn { push, resolved } => {
            match resolved {
                AllInAs::Bet => next.open_with_bet(actor, push),
                AllInAs::Raise { increment, reopens } => {
                    next.raise(actor, push, increment, reopens)
                }
                AllInAs::Call => next.pay_call(actor, push, 0),
                AllInAs::ShortCall { refund } => next.pay_call(actor, push, refund),
            }
            next.events.push(HandEvent::AllIn {
                who: actor,
                amt: push,
                resolved,
            });
        }
    }
    debug!(
        hand_id = %next.hand_id,
        seat = actor,
        %action,
        ?amount,
        street = %next.street,
        "action applied"
    );

    next.to_act = Some(1 - actor);
    next.maybe_advance()?;
    debug_assert_eq!(next.total_chips(), next.starting_total());
    Ok(next)
}

impl GameState {
    fn pay_call(&mut self, actor: usize, pay: u32, refund: u32) {
        self.players[actor] = self.players[actor].commit(pay);
        if refund > 0 {
            let opp = 1 - actor;
            self.players[opp] = self.players[opp].refund(refund);
        }
    }

    fn open_with_bet(&mut self, actor: usize, amount: u32) {
        self.players[actor] = self.players[actor].commit(amount);
        self.last_bet = self.players[actor].invested_street;
        self.last_raise_size = amount;
        self.open_bet = true;
        self.checks_in_round = 0;
    }

    /// A raise that does not reopen moves chips but leaves the sizing alone.
    fn raise(&mut self, actor: usize, put: u32, increment: u32, reopens: bool) {
        self.players[actor] = self.players[actor].commit(put);
        if reopens {
            self.last_bet = self.players[actor].invested_street;
            self.last_raise_size = increment;
        }
        self.open_bet = true;
        self.checks_in_round = 0;
    }

    /// Sweeps every chip in play into one total and zeroes the pot.
    fn collect_pot(&mut self) -> u32 {
        let total = self.pot + self.players.iter().map(|p| p.invested_street).sum::<u32>();
        self.players = self.players.map(|p| p.sweep());
        self.pot = 0;
        total
    }

    fn finish(&mut self) {
        self.street = Street::Complete;
        self.to_act = None;
    }
}

fn settle_fold(gs: &mut GameState, winner: usize) {
    let amt = gs.collect_pot();
    gs.players[winner] = gs.players[winner].win(amt);
    gs.events.push(HandEvent::WinFold { who: winner, amt });
    gs.finish();
    info!(hand_id = %gs.hand_id, winner, amt, "hand won by fold");
}

/// Settles a hand waiting at showdown; any other state is returned unchanged.
///
/// Both seats are evaluated with `evaluator`. An exact tie splits the pot
/// with the odd chip going to seat 1.
pub fn settle_if_needed(
    gs: &GameState,
    evaluator: &dyn HandEvaluator,
) -> Result<GameState, GameError> {
    if gs.street != Street::Showdown {
        return Ok(gs.clone());
    }
    let board: [Card; 5] = gs.board.as_slice().try_into().map_err(|_| {
        GameError::InvalidState(format!("showdown with {} board cards", gs.board.len()))
    })?;
    let r0 = evaluator.evaluate7(&gs.players[0].hole, &board)?;
    let r1 = evaluator.evaluate7(&gs.players[1].hole, &board)?;

    let mut next = gs.clone();
    let total = next.collect_pot();
    let winner = match r0.strength.cmp(&r1.strength) {
        Ordering::Greater => Some(0),
        Ordering::Less => Some(1),
        Ordering::Equal => None,
    };
    next.events.push(HandEvent::Showdown {
        winner,
        is_tie: winner.is_none(),
        best5: [r0.best5, r1.best5],
        board: board.to_vec(),
    });
    match winner {
        Some(who) => {
            next.players[who] = next.players[who].win(total);
            next.events.push(HandEvent::WinShowdown { who, amt: total });
            info!(hand_id = %next.hand_id, winner = who, amt = total, evaluator = evaluator.name(), "showdown won");
        }
        None => {
            let half = total / 2;
            let amts = [half, total - half];
            for (seat, amt) in amts.into_iter().enumerate() {
                next.players[seat] = next.players[seat].win(amt);
            }
            next.events.push(HandEvent::Split { amts });
            info!(hand_id = %next.hand_id, amt = total, "showdown split");
        }
    }
    next.finish();
    debug_assert_eq!(next.total_chips(), next.starting_total());
    Ok(next)
}
