//! Best command implementation - show or reset the stored best score.

#![allow(clippy::needless_pass_by_value)]

use super::CliError;
use slide48::store::{JsonFileStore, ScoreStore};
use std::path::PathBuf;
use tracing::info;

/// Execute the best command.
///
/// # Errors
///
/// Returns an error if the best score file cannot be read or written.
pub(crate) fn execute(best_file: PathBuf, reset: bool) -> Result<(), CliError> {
    let mut store = JsonFileStore::new(best_file);

    if reset {
        store.save_best(0)?;
        info!(path = %store.path().display(), "best score reset");
        println!("Best score reset ({})", store.path().display());
        return Ok(());
    }

    let best = store.load_best()?;
    println!("Best score: {best} ({})", store.path().display());
    Ok(())
}
