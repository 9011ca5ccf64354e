//! To-do list state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::TodoId;

/// Store key used by front ends that persist the list.
pub const TODOS_KEY: &str = "todos";

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Ordered to-do items with monotonically increasing ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    items: Vec<TodoItem>,
    #[serde(default)]
    next_id: u64,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<TodoId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = TodoId(self.next_id);
        self.items.push(TodoItem {
            id,
            text: text.to_owned(),
            done: false,
            created_at: Utc::now(),
        });
        Some(id)
    }

    /// Flip the done flag. False for an unknown id.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.done = !item.done;
                true
            }
            None => false,
        }
    }

    /// False for an unknown id.
    pub fn remove(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Drop every finished item; returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.done);
        before - self.items.len()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of items not yet done.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.done).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
