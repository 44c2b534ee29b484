//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, one
//! `{"value": .., "source": ..}` object per field:
//!
//! ```json
//! {
//!   "bb": { "value": 2, "source": "default" },
//!   "evaluator": { "value": "highcard", "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "init_stack": {
            "value": config.init_stack,
            "source": sources.init_stack,
        },
        "sb": {
            "value": config.sb,
            "source": sources.sb,
        },
        "bb": {
            "value": config.bb,
            "source": sources.bb,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "evaluator": {
            "value": config.evaluator,
            "source": sources.evaluator,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
