use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{apply_action, settle_if_needed};
use crate::errors::GameError;
use crate::evaluator::HandEvaluator;
use crate::events::HandEvent;
use crate::game::{start_hand_with_carry, GameState, HandConfig};

/// Complete record of a finished hand, one JSON object per line in a hand log.
/// Seed and starting stacks are enough to reproduce the deal; the events
/// hold every decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    pub session_id: String,
    pub seed: u64,
    pub button: usize,
    pub sb: u32,
    pub bb: u32,
    /// Stacks before blinds
    pub starting_stacks: [u32; 2],
    pub final_stacks: [u32; 2],
    pub events: Vec<HandEvent>,
    /// Timestamp when the hand was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    pub fn from_state(gs: &GameState) -> Result<Self, GameError> {
        if !gs.is_complete() {
            return Err(GameError::HandNotComplete);
        }
        Ok(Self {
            hand_id: gs.hand_id.clone(),
            session_id: gs.session_id.clone(),
            seed: gs.seed,
            button: gs.button,
            sb: gs.sb,
            bb: gs.bb,
            starting_stacks: gs.starting_stacks,
            final_stacks: gs.stacks(),
            events: gs.events.clone(),
            ts: None,
        })
    }

    /// Re-deals the hand from its seed, re-applies every recorded decision
    /// and settles. The caller decides what counts as a mismatch.
    pub fn replay(&self, evaluator: &dyn HandEvaluator) -> Result<GameState, GameError> {
        let cfg = HandConfig {
            init_stack: self.starting_stacks[0].max(self.starting_stacks[1]),
            sb: self.sb,
            bb: self.bb,
        };
        let mut gs = start_hand_with_carry(
            &cfg,
            &self.session_id,
            &self.hand_id,
            self.button,
            self.starting_stacks,
            Some(self.seed),
        )?;
        for (who, action, amount) in self.events.iter().filter_map(HandEvent::replay_action) {
            if gs.to_act != Some(who) {
                return Err(GameError::InvalidState(format!(
                    "recorded {action} by seat {who} out of turn"
                )));
            }
            gs = apply_action(&gs, action, amount)?;
        }
        settle_if_needed(&gs, evaluator)
    }

    /// True when `gs` reproduces this record's events and final stacks.
    pub fn matches(&self, gs: &GameState) -> bool {
        gs.events == self.events && gs.stacks() == self.final_stacks
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`HandRecord`]s to a JSONL file and hands out sequential ids.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Id generator without a file behind it.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
