//! Command-line entry point over a Folio database file.
//!
//! # Responsibility
//! - Drive `ItemStore` operations against a SQLite file for local inspection.
//! - Print results as pretty JSON; report failures on stderr with exit code 1.

use folio_core::{
    init_logging_from_config, CoreConfig, ItemId, ItemStore, SqliteBackend, StoreSnapshot,
};
use log::info;
use serde_json::Value;
use std::process::ExitCode;

const USAGE: &str = "usage: folio_cli <db-path> <command> [args]

commands:
  tree                      print the folder forest
  docs                      print all documents
  folders                   print all folders
  new-doc [title]           create a document (placeholder title when omitted)
  new-folder [name]         create a folder (placeholder name when omitted)
  rename <id> <name>        rename a document or folder
  delete <id>               delete a document or folder
  move <id> <from|-> <to|-> move an item; `-` means root level

env:
  FOLIO_CONFIG              path to a JSON config file";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("folio_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<String, String> {
    let [db_path, command, rest @ ..] = args else {
        return Err(USAGE.to_string());
    };

    let config = load_config()?;
    init_logging_from_config(&config)?;

    let backend = SqliteBackend::open(db_path, &config).map_err(|err| err.to_string())?;
    let store = ItemStore::load(backend)
        .await
        .map_err(|err| err.to_string())?;
    info!("event=cli_command module=cli command={command}");

    let output = match (command.as_str(), rest) {
        ("tree", []) => to_json(&store.tree())?,
        ("docs", []) => to_json(&store.documents())?,
        ("folders", []) => to_json(&store.folders())?,
        ("new-doc", []) => to_json(&store.create_untitled_document().await.map_err(fail)?)?,
        ("new-doc", [title]) => {
            to_json(&store.create_document(title.as_str()).await.map_err(fail)?)?
        }
        ("new-folder", []) => to_json(&store.create_unnamed_folder().await.map_err(fail)?)?,
        ("new-folder", [name]) => {
            to_json(&store.create_folder(name.as_str()).await.map_err(fail)?)?
        }
        ("rename", [id, name]) => {
            let id = parse_id(id)?;
            store
                .update_item_name(&id, name.as_str())
                .await
                .map_err(fail)?;
            item_json(&store.snapshot(), &id)?
        }
        ("delete", [id]) => {
            let id = parse_id(id)?;
            store.delete_item(&id).await.map_err(fail)?;
            to_json(&store.tree())?
        }
        ("move", [id, from, to]) => {
            let id = parse_id(id)?;
            let from = parse_position(from)?;
            let to = parse_position(to)?;
            store
                .move_item_between_folders(&id, from.as_ref(), to.as_ref())
                .await
                .map_err(fail)?;
            to_json(&store.tree())?
        }
        _ => return Err(USAGE.to_string()),
    };
    Ok(output)
}

fn load_config() -> Result<CoreConfig, String> {
    match std::env::var_os("FOLIO_CONFIG") {
        Some(path) => CoreConfig::load(path).map_err(|err| err.to_string()),
        None => Ok(CoreConfig::default()),
    }
}

fn parse_id(value: &str) -> Result<ItemId, String> {
    ItemId::parse(value).map_err(|err| err.to_string())
}

/// `-` stands for root level.
fn parse_position(value: &str) -> Result<Option<ItemId>, String> {
    if value == "-" {
        return Ok(None);
    }
    parse_id(value).map(Some)
}

fn item_json(snapshot: &StoreSnapshot, id: &ItemId) -> Result<String, String> {
    let item = id.dispatch(
        || {
            snapshot
                .documents
                .iter()
                .find(|document| document.id == *id)
                .map(serde_json::to_value)
        },
        || {
            snapshot
                .folders
                .iter()
                .find(|folder| folder.id == *id)
                .map(serde_json::to_value)
        },
    );
    match item {
        Some(value) => to_json(&value.map_err(|err| err.to_string())?),
        None => to_json(&Value::Null),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| err.to_string())
}

fn fail(err: folio_core::StoreError) -> String {
    err.to_string()
}
