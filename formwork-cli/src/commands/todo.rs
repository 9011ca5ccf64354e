//! `formwork todo add|list|done|remove|clear`
//!
//! The list is kept as JSON under the `todos` key of the local store.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use formwork_core::{KeyValueStore, TodoId, TodoList, TODOS_KEY};
use formwork_store::JsonFileStore;

use super::open_store;

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Add an item; words are joined with spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List every item.
    List(ListArgs),

    /// Toggle an item between open and done.
    Done { id: u64 },

    /// Delete an item.
    Remove { id: u64 },

    /// Delete every finished item.
    Clear,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "done")]
    done: &'static str,
    #[tabled(rename = "text")]
    text: String,
    #[tabled(rename = "added")]
    added: String,
}

pub fn run(cmd: TodoCommand) -> Result<()> {
    let mut store = open_store()?;
    let mut list = load_list(&store)?;

    match cmd {
        TodoCommand::Add { text } => {
            let text = text.join(" ");
            let Some(id) = list.add(&text) else {
                bail!("to-do text must not be blank");
            };
            save_list(&mut store, &list)?;
            println!("{} Added #{id}", "✓".green());
        }
        TodoCommand::List(args) => print_list(&list, args.json)?,
        TodoCommand::Done { id } => {
            if !list.toggle(TodoId(id)) {
                bail!("no to-do with id {id}");
            }
            save_list(&mut store, &list)?;
            let done = list.get(TodoId(id)).is_some_and(|item| item.done);
            println!("{} #{id} marked {}", "✓".green(), if done { "done" } else { "open" });
        }
        TodoCommand::Remove { id } => {
            if !list.remove(TodoId(id)) {
                bail!("no to-do with id {id}");
            }
            save_list(&mut store, &list)?;
            println!("{} Removed #{id}", "✓".green());
        }
        TodoCommand::Clear => {
            let removed = list.clear_completed();
            save_list(&mut store, &list)?;
            println!("{} Cleared {removed} finished item(s)", "✓".green());
        }
    }
    Ok(())
}

fn load_list(store: &JsonFileStore) -> Result<TodoList> {
    match store.get(TODOS_KEY)? {
        Some(raw) => serde_json::from_str(&raw).context("stored to-do list is corrupt"),
        None => Ok(TodoList::new()),
    }
}

fn save_list(store: &mut JsonFileStore, list: &TodoList) -> Result<()> {
    let json = serde_json::to_string(list)?;
    store.set(TODOS_KEY, &json).context("failed to save to-do list")
}

fn print_list(list: &TodoList, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(list.items())?);
        return Ok(());
    }
    if list.is_empty() {
        println!("Nothing to do.");
        println!("Run: formwork todo add <text>");
        return Ok(());
    }

    let rows: Vec<TodoRow> = list
        .items()
        .iter()
        .map(|item| TodoRow {
            id: item.id.0,
            done: if item.done { "✓" } else { "" },
            text: item.text.clone(),
            added: item.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("{} item(s) left", list.remaining());
    Ok(())
}
