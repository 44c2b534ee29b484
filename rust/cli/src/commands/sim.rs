//! Simulation command handler.
//!
//! Plays a heads-up session with a seeded random policy that picks uniformly
//! among the listed legal actions (and uniformly inside a bet/raise window).
//! Every state reached is checked: chips are conserved, a non-terminal state
//! lists at least one action, every listed action (and both ends of its
//! window) validates while every unlisted one is refused, and each finished
//! hand replays from its record to the same events. Any violation stops the
//! run with [`CliError::Verification`].
//!
//! # Examples
//!
//! ```no_run
//! use hucoach_cli::commands::sim::handle_sim_command;
//! use hucoach_cli::config::Config;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//! handle_sim_command(&Config::default(), 100, Some(42), Some("data/sim.jsonl"), &mut out, &mut err).unwrap();
//! ```

use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use chrono::Utc;
use hucoach_engine::engine::{apply_action, settle_if_needed};
use hucoach_engine::errors::GameError;
use hucoach_engine::events::HandEvent;
use hucoach_engine::evaluator::HandEvaluator;
use hucoach_engine::game::{GameState, Street, start_hand};
use hucoach_engine::logger::{HandLogger, HandRecord, format_hand_id};
use hucoach_engine::player::ActionKind;
use hucoach_engine::rules::{LegalAction, legal_actions, legal_actions_struct, validate_action};
use hucoach_engine::session::{SessionView, next_hand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use tracing::{debug, info};

/// Upper bound on decisions in one hand; a correct engine needs far fewer.
const MAX_STEPS_PER_HAND: usize = 10_000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimSummary {
    pub hands: u32,
    pub folds: u32,
    pub showdowns: u32,
    pub splits: u32,
    pub final_stacks: [u32; 2],
}

pub fn handle_sim_command(
    cfg: &Config,
    hands: u32,
    seed: Option<u64>,
    output: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut logger = output.map(HandLogger::create).transpose()?;
    let evaluator = cfg.evaluator.build();

    let summary = run_session(cfg, hands, base_seed, evaluator.as_ref(), logger.as_mut(), out)?;

    writeln!(
        out,
        "Simulated: {} hands (seed {}, evaluator {})",
        summary.hands, base_seed, cfg.evaluator
    )?;
    writeln!(
        out,
        "Folds: {} Showdowns: {} Splits: {}",
        summary.folds, summary.showdowns, summary.splits
    )?;
    writeln!(
        out,
        "Final stacks: P1={} P2={}",
        summary.final_stacks[0], summary.final_stacks[1]
    )?;
    if let Some(path) = output {
        writeln!(out, "Records: {}", path)?;
    }
    Ok(())
}

fn run_session(
    cfg: &Config,
    hands: u32,
    base_seed: u64,
    evaluator: &dyn HandEvaluator,
    mut logger: Option<&mut HandLogger>,
    out: &mut dyn Write,
) -> Result<SimSummary, CliError> {
    let hand_cfg = cfg.hand_config();
    let mut policy = ChaCha20Rng::seed_from_u64(base_seed);
    let session_id = format!("sim-{}", base_seed);
    let date = Utc::now().format("%Y%m%d").to_string();
    let hand_id = |n: u32, logger: &mut Option<&mut HandLogger>| match logger {
        Some(l) => l.next_id(),
        None => format_hand_id(&date, n),
    };

    let mut view = SessionView::new(session_id.as_str(), &hand_cfg);
    let first_id = hand_id(view.hand_no, &mut logger);
    let mut gs = start_hand(&hand_cfg, &session_id, &first_id, view.button, Some(base_seed))?;
    view.current_hand_id = Some(first_id);
    let mut summary = SimSummary {
        final_stacks: [hand_cfg.init_stack; 2],
        ..SimSummary::default()
    };

    loop {
        let done = play_random_hand(gs, evaluator, &mut policy)?;
        let record = HandRecord::from_state(&done)?;
        let replayed = record.replay(evaluator)?;
        if !record.matches(&replayed) {
            return Err(CliError::Verification(format!(
                "hand {} does not replay from its record",
                record.hand_id
            )));
        }
        if let Some(l) = logger.as_deref_mut() {
            l.write(&record)?;
        }
        tally(&mut summary, &done);
        debug!(hand_id = %done.hand_id, stacks = ?summary.final_stacks, "simulated hand");

        if summary.hands >= hands {
            break;
        }
        let hand_seed = base_seed.wrapping_add(u64::from(view.hand_no));
        let plan = next_hand(&view, &done, Some(hand_seed))?;
        let next_id = hand_id(plan.next_hand_no, &mut logger);
        match plan.start(&hand_cfg, &next_id) {
            Ok(next) => {
                gs = next;
                view = plan.into_view(&next_id);
            }
            Err(GameError::InsufficientBlind { seat, stack, blind }) => {
                info!(seat, stack, blind, hands = summary.hands, "session ended");
                writeln!(
                    out,
                    "Session ended: P{} has {} chips and cannot post {}",
                    seat + 1,
                    stack,
                    blind
                )?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(summary)
}

fn tally(summary: &mut SimSummary, done: &GameState) {
    summary.hands += 1;
    summary.final_stacks = done.stacks();
    for event in &done.events {
        match event {
            HandEvent::WinFold { .. } => summary.folds += 1,
            HandEvent::WinShowdown { .. } => summary.showdowns += 1,
            HandEvent::Split { .. } => {
                summary.showdowns += 1;
                summary.splits += 1;
            }
            _ => {}
        }
    }
}

/// Plays `gs` to completion with the random policy, checking the engine's
/// invariants on every state.
pub fn play_random_hand(
    mut gs: GameState,
    evaluator: &dyn HandEvaluator,
    policy: &mut impl Rng,
) -> Result<GameState, CliError> {
    let total = gs.starting_total();
    for _ in 0..MAX_STEPS_PER_HAND {
        if gs.total_chips() != total {
            return Err(CliError::Verification(format!(
                "hand {}: {} chips in play, expected {}",
                gs.hand_id,
                gs.total_chips(),
                total
            )));
        }
        match gs.street {
            Street::Complete => return Ok(gs),
            Street::Showdown => {
                gs = settle_if_needed(&gs, evaluator)?;
                continue;
            }
            _ => {}
        }
        let legal = legal_actions_struct(&gs);
        if legal.is_empty() {
            return Err(CliError::Verification(format!(
                "hand {}: no legal action on the {}",
                gs.hand_id, gs.street
            )));
        }
        check_listed_actions(&gs, &legal)?;
        let pick = legal[policy.random_range(0..legal.len())];
        let amount = match (pick.min, pick.max) {
            (Some(lo), Some(hi)) if pick.action.is_sized() => Some(policy.random_range(lo..=hi)),
            _ => None,
        };
        gs = apply_action(&gs, pick.action, amount).map_err(|e| {
            CliError::Verification(format!(
                "hand {}: listed action {} {:?} rejected: {}",
                gs.hand_id, pick.action, amount, e
            ))
        })?;
    }
    Err(CliError::Verification(format!(
        "hand {} did not finish within {} steps",
        gs.hand_id, MAX_STEPS_PER_HAND
    )))
}

/// Dry-runs every action kind against `gs`: listed kinds and their window
/// bounds must validate, the rest must be refused.
pub fn check_listed_actions(gs: &GameState, legal: &[LegalAction]) -> Result<(), CliError> {
    let names = legal_actions(gs);
    for action in ActionKind::ALL {
        let listed = names.contains(&action);
        let accepted = validate_action(gs, action, None).is_ok();
        if listed != accepted {
            return Err(CliError::Verification(format!(
                "hand {}: {} is {} but {}",
                gs.hand_id,
                action,
                if listed { "listed" } else { "unlisted" },
                if accepted { "accepted" } else { "rejected" },
            )));
        }
    }
    for entry in legal {
        if !names.contains(&entry.action) {
            return Err(CliError::Verification(format!(
                "hand {}: window for unlisted {}",
                gs.hand_id, entry.action
            )));
        }
        for bound in [entry.min, entry.max].into_iter().flatten() {
            if entry.action.is_sized() && validate_action(gs, entry.action, Some(bound)).is_err() {
                return Err(CliError::Verification(format!(
                    "hand {}: {} {} is a window bound but rejected",
                    gs.hand_id, entry.action, bound
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hucoach_engine::evaluator::StandardEvaluator;
    use hucoach_engine::game::HandConfig;

    #[test]
    fn random_hands_finish_and_conserve_chips() {
        let mut policy = ChaCha20Rng::seed_from_u64(3);
        for seed in 0..50 {
            let gs = start_hand(&HandConfig::default(), "t", "h", (seed % 2) as usize, Some(seed))
                .unwrap();
            let done = play_random_hand(gs, &StandardEvaluator, &mut policy).unwrap();
            assert!(done.is_complete());
            assert_eq!(done.stacks().iter().sum::<u32>(), 400);
        }
    }

    #[test]
    fn every_action_kind_is_checked_against_the_legal_list() {
        let gs = start_hand(&HandConfig::default(), "t", "h", 0, Some(4)).unwrap();
        check_listed_actions(&gs, &legal_actions_struct(&gs)).unwrap();

        // big blind option after a limp: check and raise, no call or bet
        let gs = apply_action(&gs, ActionKind::Call, None).unwrap();
        check_listed_actions(&gs, &legal_actions_struct(&gs)).unwrap();
        assert!(validate_action(&gs, ActionKind::Call, None).is_err());

        // short-stacked facing a bet: the window entries still validate
        let cfg = HandConfig {
            init_stack: 20,
            ..HandConfig::default()
        };
        let gs = hucoach_engine::game::start_hand_with_carry(&cfg, "t", "h", 1, [20, 7], Some(6))
            .unwrap();
        let gs = apply_action(&gs, ActionKind::Raise, Some(10)).unwrap();
        check_listed_actions(&gs, &legal_actions_struct(&gs)).unwrap();
    }

    #[test]
    fn window_for_an_unlisted_action_is_flagged() {
        let gs = start_hand(&HandConfig::default(), "t", "h", 0, Some(4)).unwrap();
        let stray = LegalAction {
            action: ActionKind::Check,
            min: None,
            max: None,
            to_call: None,
        };
        let err = check_listed_actions(&gs, &[stray]).unwrap_err();
        assert!(matches!(err, CliError::Verification(_)));
    }

    #[test]
    fn same_seed_same_session() {
        let run = || {
            let mut out = Vec::new();
            let evaluator = StandardEvaluator;
            let s = run_session(&Config::default(), 20, 9, &evaluator, None, &mut out).unwrap();
            (s, out)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn tally_counts_outcomes() {
        let mut policy = ChaCha20Rng::seed_from_u64(1);
        let gs = start_hand(&HandConfig::default(), "t", "h", 0, Some(1)).unwrap();
        let gs = apply_action(&gs, hucoach_engine::player::ActionKind::Fold, None).unwrap();
        let done = play_random_hand(gs, &StandardEvaluator, &mut policy).unwrap();
        let mut summary = SimSummary::default();
        tally(&mut summary, &done);
        assert_eq!((summary.hands, summary.folds, summary.showdowns), (1, 1, 0));
        assert_eq!(summary.final_stacks, [199, 201]);
    }
}
