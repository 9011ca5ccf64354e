//! `formwork theme show|toggle|set`

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use formwork_core::{Theme, ThemeProvider};

use super::open_store;

/// Show or change the persisted theme.
#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Print the current theme (`light` when never set).
    Show,

    /// Switch between light and dark.
    Toggle,

    /// Set the theme explicitly.
    Set {
        /// `light` or `dark`.
        theme: Theme,
    },
}

pub fn run(cmd: ThemeCommand) -> Result<()> {
    let mut provider = ThemeProvider::load(open_store()?).context("failed to read theme")?;
    match cmd {
        ThemeCommand::Show => println!("{}", provider.theme()),
        ThemeCommand::Toggle => {
            let theme = provider.toggle().context("failed to save theme")?;
            println!("{} Theme is now {}", "✓".green(), theme);
        }
        ThemeCommand::Set { theme } => {
            provider.set(theme).context("failed to save theme")?;
            println!("{} Theme is now {}", "✓".green(), theme);
        }
    }
    Ok(())
}
