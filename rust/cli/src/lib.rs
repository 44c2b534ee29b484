//! # hucoach CLI Library
//!
//! Command-line front end for the `hucoach_engine` heads-up betting engine.
//!
//! The primary entry point is [`run`], which parses arguments, loads the
//! layered configuration and dispatches to a command handler. Output and
//! error streams are parameters so the whole CLI can be driven from tests.
//!
//! ## Available Subcommands
//!
//! - `deal`: start one seeded hand and show holes, blinds and legal actions
//! - `play`: hot-seat play of a session on stdin
//! - `sim`: random-policy self-play that verifies engine invariants
//! - `replay`: re-run a JSONL file of hand records and report mismatches
//! - `cfg`: print the resolved configuration with value sources

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HucoachCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_replay_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "play", "sim", "replay", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns the process exit code: `0` for success, `2` for errors, `130`
/// when the user quits an interactive session.
///
/// # Example
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = hucoach_cli::run(["hucoach", "deal", "--seed", "42"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Hole P1:"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HucoachCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            e.exit_code()
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Deal { seed, button } => {
            handle_deal_command(&config::load()?, seed, button, out)
        }
        Commands::Play { hands, seed } => {
            let cfg = config::load()?;
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&cfg, hands, seed, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            hands,
            seed,
            output,
            eval,
        } => {
            let cfg = with_evaluator(config::load()?, eval);
            handle_sim_command(&cfg, hands, seed, output.as_deref(), out, err)
        }
        Commands::Replay { input, eval } => {
            let cfg = with_evaluator(config::load()?, eval);
            handle_replay_command(&cfg, &input, out, err)
        }
    }
}

/// A `--eval` flag beats the configured evaluator.
fn with_evaluator(mut cfg: config::Config, eval: Option<cli::EvalArg>) -> config::Config {
    if let Some(e) = eval {
        cfg.evaluator = e.into();
    }
    cfg
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = (|| -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "Usage: hucoach <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: hucoach --help")
    })();
    exit_code::ERROR
}
