//! Replay command handler.
//!
//! Reads a JSONL file of hand records, re-runs each hand from its seed,
//! starting stacks and recorded decisions, and compares the reproduced event
//! log and final stacks with the record.

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::read_text;
use crate::ui;
use hucoach_engine::logger::HandRecord;
use std::io::Write;
use tracing::warn;

pub fn handle_replay_command(
    cfg: &Config,
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = match read_text(input) {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
            return Err(e.into());
        }
    };
    let evaluator = cfg.evaluator.build();

    let mut replayed = 0usize;
    let mut mismatches = 0usize;
    for (idx, line) in content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
    {
        let line_no = idx + 1;
        replayed += 1;
        let record: HandRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                mismatches += 1;
                ui::write_error(err, &format!("line {}: invalid record: {}", line_no, e))?;
                continue;
            }
        };
        match record.replay(evaluator.as_ref()) {
            Ok(gs) if record.matches(&gs) => {}
            Ok(gs) => {
                mismatches += 1;
                warn!(hand_id = %record.hand_id, line = line_no, "replay mismatch");
                writeln!(
                    out,
                    "Mismatch: hand {} (line {}): recorded stacks {:?}, replayed {:?}",
                    record.hand_id,
                    line_no,
                    record.final_stacks,
                    gs.stacks()
                )?;
            }
            Err(e) => {
                mismatches += 1;
                ui::write_error(
                    err,
                    &format!("line {}: hand {} failed to replay: {}", line_no, record.hand_id, e),
                )?;
            }
        }
    }

    writeln!(out, "Replayed: {} hands, mismatches: {}", replayed, mismatches)?;
    if mismatches > 0 {
        return Err(CliError::Verification(format!(
            "{} of {} hands did not reproduce",
            mismatches, replayed
        )));
    }
    Ok(())
}
