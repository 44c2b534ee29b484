//! Command handler modules.
//!
//! Each command lives in its own file and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`. Output streams are
//! passed in as `&mut dyn Write` (and `play` also takes its input reader) so
//! tests can drive the handlers with in-memory buffers.

pub mod cfg;
pub mod deal;
pub mod play;
pub mod replay;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use replay::handle_replay_command;
pub use sim::handle_sim_command;
