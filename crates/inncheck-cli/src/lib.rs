//! InnCheck command line
//!
//! Persisted state lives in a data directory (`.inncheck` by default):
//! - `rooms.json`, `templates.json`, `user.json` - see [`state`]
//! - `inncheck.toml` - optional settings, see [`config`]
//!
//! Every invocation loads the state, runs one command and saves the state
//! back when the command mutates it.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod state;

pub use cli::{Cli, Commands};
pub use commands::Context;
pub use config::InnCheckConfig;
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a parsed command line to completion
///
/// # Errors
/// Config or state cannot be read, the command fails, or the state cannot
/// be written back.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = InnCheckConfig::load(cli.config.as_deref(), &cli.data_dir)?;
    let mut state = AppState::load(&cli.data_dir)?;
    let ctx = Context {
        json: cli.json,
        config,
        data_dir: cli.data_dir,
    };

    let mutates = cli.command.mutates();
    commands::dispatch(&ctx, &mut state, cli.command).await?;
    if mutates {
        state.save(&ctx.data_dir)?;
    }
    Ok(())
}
