//! # formwork-store
//!
//! Durable key-value storage for Formwork widgets.
//!
//! [`JsonFileStore`] implements [`formwork_core::KeyValueStore`] on top of a
//! single JSON document at `<home>/.formwork/storage.json`, written with the
//! atomic `.tmp` + rename pattern.

pub mod error;
pub mod json_store;

pub use error::StoreError;
pub use json_store::{store_path_at, JsonFileStore, StoreFile};
