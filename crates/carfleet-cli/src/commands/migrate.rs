//! Schema migration command
//!
//! Usage: carfleet migrate [--db <PATH>]

use carfleet_store::migrations;

use super::{open_provider, resolve_config};
use crate::GlobalArgs;

/// Apply pending migrations and report which ran
pub fn execute(global: &GlobalArgs) -> anyhow::Result<()> {
    let provider = open_provider(resolve_config(global)?)?;
    let applied = migrations::bootstrap(provider.as_ref())?;

    println!(
        "{}",
        serde_json::json!({
            "database": provider.config().database_path.display().to_string(),
            "applied": applied,
        })
    );
    Ok(())
}
