//! Manufacturer commands
//!
//! Every subcommand prints its result as JSON on stdout.

use anyhow::bail;
use carfleet_core::{Manufacturer, ManufacturerStore};
use carfleet_store::{migrations, SqliteManufacturerStore};
use clap::{Args, Subcommand};

use super::{open_provider, resolve_config};
use crate::GlobalArgs;

#[derive(Debug, Args)]
pub struct ManufacturerArgs {
    #[command(subcommand)]
    pub command: ManufacturerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ManufacturerCommand {
    /// Create a manufacturer and print it with its new id
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        country: String,
    },
    /// Print one manufacturer, including logically deleted ones
    Get { id: i64 },
    /// Print all manufacturers that are not deleted
    List,
    /// Replace name and country of an existing manufacturer
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        country: String,
    },
    /// Mark a manufacturer as deleted
    Delete { id: i64 },
}

impl ManufacturerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ManufacturerCommand::Create { .. } => "manufacturer create",
            ManufacturerCommand::Get { .. } => "manufacturer get",
            ManufacturerCommand::List => "manufacturer list",
            ManufacturerCommand::Update { .. } => "manufacturer update",
            ManufacturerCommand::Delete { .. } => "manufacturer delete",
        }
    }
}

pub fn execute(args: ManufacturerArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let store = open_store(global)?;
    run(args.command, &store)
}

fn open_store(global: &GlobalArgs) -> anyhow::Result<SqliteManufacturerStore> {
    let config = resolve_config(global)?;
    let run_migrations = config.run_migrations;
    let provider = open_provider(config)?;
    if run_migrations {
        migrations::bootstrap(provider.as_ref())?;
    }
    Ok(SqliteManufacturerStore::new(provider))
}

fn run(command: ManufacturerCommand, store: &dyn ManufacturerStore) -> anyhow::Result<()> {
    match command {
        ManufacturerCommand::Create { name, country } => {
            let created = store.create(Manufacturer::new(name, country))?;
            print_json(&created)
        }
        ManufacturerCommand::Get { id } => match store.get_by_id(id)? {
            Some(found) => print_json(&found),
            None => bail!("manufacturer {} not found", id),
        },
        ManufacturerCommand::List => print_json(&store.get_all()?),
        ManufacturerCommand::Update { id, name, country } => {
            match store.update(Manufacturer::new(name, country).with_id(id))? {
                Some(updated) => print_json(&updated),
                None => bail!("manufacturer {} not found", id),
            }
        }
        ManufacturerCommand::Delete { id } => {
            let deleted = store.delete(id)?;
            print_json(&serde_json::json!({ "id": id, "deleted": deleted }))
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
