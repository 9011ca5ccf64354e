//! Formwork: registration form, theme and to-do widgets on the command line.
//!
//! # Usage
//!
//! ```text
//! formwork register [--username U] [--email E] [--password P] [--confirm C]
//!                   [--form <definition.yaml>] [--field id=value ...] [--html]
//! formwork theme show | toggle | set <light|dark>
//! formwork todo add <text> | list [--json] | done <id> | remove <id> | clear
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{register::RegisterArgs, theme::ThemeCommand, todo::TodoCommand};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "formwork",
    version,
    about = "Validate registration forms and manage small UI widget state",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in a form, submit it and print the validated field views.
    Register(RegisterArgs),

    /// Show or change the persisted light/dark theme.
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },

    /// Manage the persisted to-do list.
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "dispatching");
    match cli.command {
        Commands::Register(args) => args.run(),
        Commands::Theme { command } => commands::theme::run(command),
        Commands::Todo { command } => commands::todo::run(command),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
