//! Command handler layer.
//!
//! Parses CLI input, delegates to the core and capture crates, and prints
//! results. Handlers mutate the [`AppState`] in place; `main` saves it.
//!
//! ## Files
//! - `session.rs` - login/logout
//! - `units.rs` - units and their checklists
//! - `templates.rs` - checklist templates
//! - `intake.rs` - check-in and check-out
//! - `reports.rs` - reports, share text, dashboard, CPF check

pub mod intake;
pub mod reports;
pub mod session;
pub mod templates;
pub mod units;

use crate::cli::Commands;
use crate::config::InnCheckConfig;
use crate::state::AppState;
use std::path::PathBuf;

/// What every handler needs besides the state
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub config: InnCheckConfig,
    pub data_dir: PathBuf,
}

/// Run one command against the state
///
/// # Errors
/// Whatever the handler reports.
pub async fn dispatch(ctx: &Context, state: &mut AppState, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { name, role } => session::login(ctx, state, &name, role),
        Commands::Logout => session::logout(ctx, state),
        Commands::Units { command } => units::handle_units(ctx, state, command),
        Commands::Tasks { command } => units::handle_tasks(ctx, state, command),
        Commands::Templates { command } => templates::handle(ctx, state, command),
        Commands::CheckIn(args) => intake::check_in(ctx, state, args).await,
        Commands::CheckOut { unit } => intake::check_out(ctx, state, &unit),
        Commands::Report { command } => reports::handle_report(ctx, state, command),
        Commands::Share { unit } => reports::share(ctx, state, &unit),
        Commands::Dashboard => reports::dashboard(ctx, state),
        Commands::ValidateCpf { value } => reports::validate_cpf(ctx, &value),
    }
}
