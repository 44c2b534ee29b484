//! # Play Command
//!
//! Hot-seat heads-up play: both seats type their actions on the same input.
//! Stacks carry from hand to hand and the button alternates, until the hand
//! limit is reached, a player cannot post a blind, or the user quits.
//!
//! Input errors (unparseable text or an illegal action) are reported on the
//! error stream and the same seat is prompted again.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_cards, format_event, format_legal_list};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};
use hucoach_engine::engine::{apply_action, settle_if_needed};
use hucoach_engine::errors::GameError;
use hucoach_engine::evaluator::HandEvaluator;
use hucoach_engine::game::{GameState, Street, start_hand};
use hucoach_engine::rules::legal_actions_struct;
use hucoach_engine::session::{SessionView, next_hand};
use std::io::{BufRead, Write};

enum HandOutcome {
    Finished(GameState),
    Quit,
}

/// Handle the play command.
///
/// `hands` caps the session length; without it the session runs until a
/// carry fails or the user quits. Quitting (`q` or end of input) returns
/// [`CliError::Interrupted`] after the summary has been printed.
pub fn handle_play_command(
    cfg: &Config,
    hands: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if hands == Some(0) {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let hand_cfg = cfg.hand_config();
    let evaluator = cfg.evaluator.build();
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let session_id = format!("play-{}", base_seed);

    writeln!(
        out,
        "play: seed={} stacks={} blinds={}/{} evaluator={}",
        base_seed, hand_cfg.init_stack, hand_cfg.sb, hand_cfg.bb, cfg.evaluator
    )?;

    let mut view = SessionView::new(session_id.as_str(), &hand_cfg);
    let first_id = format!("{}-{}", session_id, view.hand_no);
    let mut gs = start_hand(&hand_cfg, &session_id, &first_id, view.button, Some(base_seed))?;
    view.current_hand_id = Some(first_id);
    let mut played = 0u32;

    loop {
        writeln!(out, "Hand {} (button P{})", view.hand_no, view.button + 1)?;
        let done = match play_hand(gs, evaluator.as_ref(), out, err, stdin)? {
            HandOutcome::Finished(done) => done,
            HandOutcome::Quit => {
                writeln!(out, "Hands played: {}", played)?;
                return Err(CliError::Interrupted("player quit".to_string()));
            }
        };
        played += 1;
        writeln!(out, "Stacks: P1={} P2={}", done.players[0].stack, done.players[1].stack)?;

        if hands.is_some_and(|limit| played >= limit) {
            break;
        }

        let hand_seed = base_seed.wrapping_add(u64::from(view.hand_no));
        let plan = next_hand(&view, &done, Some(hand_seed))?;
        let hand_id = format!("{}-{}", session_id, plan.next_hand_no);
        match plan.start(&hand_cfg, &hand_id) {
            Ok(next) => {
                gs = next;
                view = plan.into_view(&hand_id);
            }
            Err(GameError::InsufficientBlind { seat, stack, blind }) => {
                writeln!(
                    out,
                    "Session over: P{} has {} chips and cannot post {}",
                    seat + 1,
                    stack,
                    blind
                )?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

fn play_hand(
    mut gs: GameState,
    evaluator: &dyn HandEvaluator,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HandOutcome, CliError> {
    writeln!(out, "Hole P1: {}", format_cards(&gs.players[0].hole))?;
    writeln!(out, "Hole P2: {}", format_cards(&gs.players[1].hole))?;
    let mut shown = print_events(&gs, 0, out)?;

    loop {
        match gs.street {
            Street::Complete => return Ok(HandOutcome::Finished(gs)),
            Street::Showdown => {
                gs = settle_if_needed(&gs, evaluator)?;
                shown = print_events(&gs, shown, out)?;
                continue;
            }
            _ => {}
        }
        let Some(seat) = gs.to_act else {
            return Err(GameError::InvalidState("no seat to act".into()).into());
        };

        writeln!(
            out,
            "Pot: {} Board: {} | P{} to act: {}",
            gs.pot + gs.players[0].invested_street + gs.players[1].invested_street,
            format_board(&gs.board),
            seat + 1,
            format_legal_list(&legal_actions_struct(&gs))
        )?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            return Ok(HandOutcome::Quit);
        };
        match parse_player_action(&input) {
            ParseResult::Action(action, amount) => match apply_action(&gs, action, amount) {
                Ok(next) => {
                    gs = next;
                    shown = print_events(&gs, shown, out)?;
                }
                Err(e) => ui::write_error(err, &format!("Invalid action: {}", e))?,
            },
            ParseResult::Quit => return Ok(HandOutcome::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

/// Prints the events after `from` and returns the new high-water mark.
fn print_events(gs: &GameState, from: usize, out: &mut dyn Write) -> Result<usize, CliError> {
    for event in &gs.events[from..] {
        writeln!(out, "  {}", format_event(event))?;
    }
    Ok(gs.events.len())
}
