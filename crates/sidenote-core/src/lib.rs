//! Sidenote Core Library
//!
//! This crate provides the storage layer for sidenote, a small persistent
//! store for short-lived todo-style entries kept beside a coding session.
//!
//! # Architecture
//!
//! All state lives as individual files under one base directory:
//!
//! - `entries/entry_NNNNN.json` - one pretty-printed JSON file per record
//! - `active.json` - pointer to the single currently active entry
//! - `views/active-entry.md` - regenerated Markdown view of the active entry
//!
//! There is no database and no in-memory cache: every operation re-reads
//! from disk, and every write goes through an atomic temp-then-rename so
//! readers never observe partial files. The store assumes a single writing
//! process at a time; no cross-file transaction or lock file exists.
//!
//! # Quick Start
//!
//! ```text
//! let store = EntryStore::new(Config::load()?);
//!
//! // Create entries
//! let records = store
//!     .create_entries(&[CreateEntryInput::new("Review the PR")])
//!     .await?;
//!
//! // Make one active (also regenerates the Markdown view)
//! store.active().set_active(Some(&records[0].entry_id)).await?;
//! ```
//!
//! # Modules
//!
//! - `store`: entry record lifecycle and ID allocation (main entry point)
//! - `active`: active-entry pointer and its rendered view
//! - `models`: data structures for records, summaries, and inputs
//! - `config`: path resolution and configuration
//! - `error`: typed storage errors
//! - `fs_util`: atomic file writes

pub mod active;
pub mod config;
pub mod error;
pub mod fs_util;
pub mod models;
pub mod store;

pub use active::{render_view, ActivePointerStore};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use models::{
    ActivePointer, CreateEntryInput, EntryRecord, EntryStatus, EntrySummary, UpdateEntryInput,
};
pub use store::EntryStore;
