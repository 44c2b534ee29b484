//! Deal command handler: start one hand and show what the first actor may do.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_cards, format_legal_list};
use hucoach_engine::game::start_hand;
use hucoach_engine::rules::legal_actions_struct;
use std::io::Write;

/// Starts a hand with `seed` (falling back to the configured seed, then to a
/// random one) and prints the holes, the blinds and the structured legal
/// actions of the player to act.
///
/// ```ignore
/// let mut out = Vec::new();
/// handle_deal_command(&Config::default(), Some(42), 0, &mut out).unwrap();
/// ```
pub fn handle_deal_command(
    cfg: &Config,
    seed: Option<u64>,
    button: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if button > 1 {
        return Err(CliError::InvalidInput(format!(
            "button must be 0 or 1, got {}",
            button
        )));
    }
    let seed = seed.or(cfg.seed);
    let gs = start_hand(&cfg.hand_config(), "deal", "deal-1", button, seed)?;

    writeln!(out, "Seed: {}", gs.seed)?;
    writeln!(
        out,
        "Blinds: SB={} (P{}) BB={} (P{})",
        gs.sb,
        gs.small_blind_seat() + 1,
        gs.bb,
        gs.big_blind_seat() + 1
    )?;
    writeln!(out, "Hole P1: {}", format_cards(&gs.players[0].hole))?;
    writeln!(out, "Hole P2: {}", format_cards(&gs.players[1].hole))?;
    writeln!(out, "Board: {}", format_board(&gs.board))?;
    writeln!(out, "Stacks: P1={} P2={}", gs.players[0].stack, gs.players[1].stack)?;
    match gs.to_act {
        Some(seat) => {
            writeln!(out, "To act: P{}", seat + 1)?;
            writeln!(out, "Legal: {}", format_legal_list(&legal_actions_struct(&gs)))?;
        }
        None => writeln!(out, "To act: nobody ({})", gs.street)?,
    }
    Ok(())
}
