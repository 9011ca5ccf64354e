pub mod register;
pub mod theme;
pub mod todo;

use std::path::PathBuf;

use anyhow::{Context, Result};
use formwork_store::JsonFileStore;

/// Home directory the store is rooted at.
pub(crate) fn home() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

pub(crate) fn open_store() -> Result<JsonFileStore> {
    let home = home()?;
    tracing::debug!(home = %home.display(), "opening store");
    JsonFileStore::open_at(&home)
        .with_context(|| format!("failed to open store under '{}'", home.display()))
}
