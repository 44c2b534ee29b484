//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; `run` maps the
//! variants to exit codes.

use hucoach_engine::errors::GameError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::exit_code;

#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command-line arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] GameError),

    /// A replayed or simulated hand broke an engine invariant
    #[error("Verification failed: {0}")]
    Verification(String),

    /// The user quit before the session ended
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Interrupted(_) => exit_code::INTERRUPTED,
            _ => exit_code::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_convert_and_keep_their_message() {
        let e: CliError = GameError::HandNotComplete.into();
        assert!(matches!(e, CliError::Engine(GameError::HandNotComplete)));
        assert!(e.to_string().starts_with("Engine error:"));
        assert_eq!(e.exit_code(), exit_code::ERROR);
    }

    #[test]
    fn interrupted_maps_to_130() {
        assert_eq!(CliError::Interrupted("q".into()).exit_code(), 130);
    }
}
