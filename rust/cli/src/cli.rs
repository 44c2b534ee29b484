//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use hucoach_engine::evaluator::EvaluatorKind;

#[derive(Parser, Debug)]
#[command(
    name = "hucoach",
    version,
    about = "Heads-up no-limit hold'em betting engine"
)]
pub struct HucoachCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start one hand and show holes, blinds and the legal actions
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Seat on the button (0 or 1)
        #[arg(long, default_value_t = 0)]
        button: usize,
    },
    /// Hot-seat play: both seats enter actions on stdin
    Play {
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Self-play with a random legal policy, checking invariants on every step
    Sim {
        #[arg(long)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Write one hand record per line to this file
        #[arg(long)]
        output: Option<String>,
        #[arg(long, value_enum)]
        eval: Option<EvalArg>,
    },
    /// Re-run recorded hands and compare them with the record
    Replay {
        #[arg(long)]
        input: String,
        #[arg(long, value_enum)]
        eval: Option<EvalArg>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EvalArg {
    Standard,
    #[value(alias = "fallback")]
    Highcard,
}

impl From<EvalArg> for EvaluatorKind {
    fn from(v: EvalArg) -> Self {
        match v {
            EvalArg::Standard => EvaluatorKind::Standard,
            EvalArg::Highcard => EvaluatorKind::HighCard,
        }
    }
}
