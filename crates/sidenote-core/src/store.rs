//! Entry storage
//!
//! The `EntryStore` owns the directory of entry record files: it allocates
//! IDs, persists new records, reads/updates/deletes individual records, and
//! produces filtered summaries for listings.
//!
//! ## ID allocation
//!
//! IDs are allocated by scanning the entries directory and taking the
//! maximum numeric suffix plus one. There is no separate counter file that
//! could drift from the actual file set, so numbering survives crashes
//! between allocation and write: the next call simply re-scans. Gaps left
//! by deleted entries below the maximum are never refilled.
//!
//! ## Active-entry invalidation
//!
//! Mutations that touch the currently active entry call into the
//! [`ActivePointerStore`] after the entry write commits, keeping the pointer
//! and its rendered view consistent. The dependency is one-directional and
//! synchronous; there is no event system.
//!
//! ## Usage
//!
//! ```ignore
//! let store = EntryStore::new(Config::load()?);
//!
//! let records = store
//!     .create_entries(&[CreateEntryInput::new("Write the report")])
//!     .await?;
//!
//! let summaries = store.list_summaries(false).await?;
//! ```

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};

use crate::active::ActivePointerStore;
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::fs_util::{read_opt, remove_if_exists, write_json_pretty};
use crate::models::{
    entry_file_name, format_entry_id, parse_entry_sequence, CreateEntryInput, EntryRecord,
    EntrySummary, UpdateEntryInput,
};

/// File-backed store of entry records
///
/// Every operation re-reads from disk; no state is cached between calls,
/// so the store is always consistent with the latest completed write.
#[derive(Debug, Clone)]
pub struct EntryStore {
    config: Config,
    active: ActivePointerStore,
}

impl EntryStore {
    /// Create a store rooted at the configured base directory
    pub fn new(config: Config) -> Self {
        let active = ActivePointerStore::new(config.clone());
        Self { config, active }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the active-pointer store sharing this store's root
    pub fn active(&self) -> &ActivePointerStore {
        &self.active
    }

    /// Create one record per input, numbered sequentially
    ///
    /// The batch shares a single directory scan: IDs are assigned
    /// consecutively starting at (max existing suffix + 1), with no re-scan
    /// between the individual writes. Each record starts at status `todo`
    /// with an empty note unless one was supplied. Returns the created
    /// records in input order.
    pub async fn create_entries(
        &self,
        inputs: &[CreateEntryInput],
    ) -> StoreResult<Vec<EntryRecord>> {
        if inputs.is_empty() {
            return Err(StoreError::InvalidArgument(
                "entries must contain at least one item".to_string(),
            ));
        }

        let entries_dir = self.config.entries_dir();
        fs::create_dir_all(&entries_dir)
            .await
            .map_err(|source| StoreError::CreateDirectory {
                path: entries_dir.clone(),
                source,
            })?;

        let mut sequence = self.next_sequence().await?;
        let mut records = Vec::with_capacity(inputs.len());

        for input in inputs {
            let entry_id = format_entry_id(sequence);
            sequence += 1;

            let record = EntryRecord::new(&entry_id, &input.title, input.note.clone());
            write_json_pretty(&self.entry_path(&entry_id), &record).await?;
            debug!(entry_id = %entry_id, title = %record.title, "created entry");
            records.push(record);
        }

        info!(count = records.len(), "created entries");
        Ok(records)
    }

    /// Read a single entry record
    ///
    /// Returns `None` when no record with that ID exists. Unlike the
    /// pointer-read path, a record file that exists but cannot be parsed is
    /// an error here, not a silent absence.
    pub async fn get_entry(&self, entry_id: &str) -> StoreResult<Option<EntryRecord>> {
        let path = self.entry_path(entry_id);
        let Some(bytes) = read_opt(&path).await? else {
            return Ok(None);
        };

        let record =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed { path, source })?;
        Ok(Some(record))
    }

    /// List entry summaries sorted by ID ascending
    ///
    /// `done` entries are excluded unless `include_done` is set. A missing
    /// entries directory means an empty store, not an error.
    pub async fn list_summaries(&self, include_done: bool) -> StoreResult<Vec<EntrySummary>> {
        let entries_dir = self.config.entries_dir();
        let mut dir = match fs::read_dir(&entries_dir).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::ReadError {
                    path: entries_dir,
                    source,
                })
            }
        };

        let mut summaries = Vec::new();
        while let Some(dir_entry) = dir.next_entry().await.map_err(|source| {
            StoreError::ReadError {
                path: entries_dir.clone(),
                source,
            }
        })? {
            let file_name = dir_entry.file_name();
            if parse_entry_sequence(&file_name.to_string_lossy()).is_none() {
                continue;
            }

            let path = dir_entry.path();
            // A record deleted between scan and read is simply skipped
            let Some(bytes) = read_opt(&path).await? else {
                continue;
            };
            let record: EntryRecord = serde_json::from_slice(&bytes)
                .map_err(|source| StoreError::Malformed { path, source })?;

            if include_done || record.status.is_open() {
                summaries.push(record.summary());
            }
        }

        // Zero-padded IDs make the lexicographic order numeric
        summaries.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));
        Ok(summaries)
    }

    /// Merge an update onto an existing record
    ///
    /// At least one of `note` and `status` must be supplied; an explicitly
    /// empty note clears the note. If the updated entry is currently
    /// active, its view is regenerated to match.
    pub async fn update_entry(
        &self,
        entry_id: &str,
        update: &UpdateEntryInput,
    ) -> StoreResult<EntryRecord> {
        if update.is_empty() {
            return Err(StoreError::InvalidArgument(
                "update must supply note or status".to_string(),
            ));
        }

        let mut record = self
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| StoreError::not_found(entry_id))?;

        record.apply_update(update);
        write_json_pretty(&self.entry_path(entry_id), &record).await?;
        info!(entry_id = %entry_id, status = %record.status, "updated entry");

        self.active.refresh_view_if_active(&record).await?;

        Ok(record)
    }

    /// Delete a batch of entries, all-or-nothing on validation
    ///
    /// The ID list is de-duplicated preserving first occurrence. Every ID
    /// is checked for existence before any file is removed; if any are
    /// missing the whole call fails with `NotFound` naming them all. The
    /// deletion phase itself is per-file, not transactional. If the active
    /// pointer references a deleted ID it is cleared afterwards. Returns
    /// the deleted IDs.
    pub async fn delete_entries(&self, entry_ids: &[String]) -> StoreResult<Vec<String>> {
        if entry_ids.is_empty() {
            return Err(StoreError::InvalidArgument(
                "entryIds must contain at least one id".to_string(),
            ));
        }

        let mut targets: Vec<String> = Vec::with_capacity(entry_ids.len());
        for id in entry_ids {
            if !targets.contains(id) {
                targets.push(id.clone());
            }
        }

        let mut missing = Vec::new();
        for id in &targets {
            match fs::try_exists(&self.entry_path(id)).await {
                Ok(true) => {}
                Ok(false) => missing.push(id.clone()),
                Err(source) => {
                    return Err(StoreError::ReadError {
                        path: self.entry_path(id),
                        source,
                    })
                }
            }
        }
        if !missing.is_empty() {
            return Err(StoreError::NotFound { ids: missing });
        }

        for id in &targets {
            remove_if_exists(&self.entry_path(id)).await?;
            debug!(entry_id = %id, "deleted entry");
        }
        info!(count = targets.len(), "deleted entries");

        self.active.clear_if_active(&targets).await?;

        Ok(targets)
    }

    /// Next sequence number: max numeric suffix across present records, plus one
    ///
    /// A missing entries directory means an empty store, so numbering
    /// starts at 1.
    async fn next_sequence(&self) -> StoreResult<u64> {
        let entries_dir = self.config.entries_dir();
        let mut dir = match fs::read_dir(&entries_dir).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(1),
            Err(source) => {
                return Err(StoreError::ReadError {
                    path: entries_dir,
                    source,
                })
            }
        };

        let mut max = 0;
        while let Some(dir_entry) = dir.next_entry().await.map_err(|source| {
            StoreError::ReadError {
                path: entries_dir.clone(),
                source,
            }
        })? {
            if let Some(sequence) = parse_entry_sequence(&dir_entry.file_name().to_string_lossy()) {
                max = max.max(sequence);
            }
        }

        Ok(max + 1)
    }

    fn entry_path(&self, entry_id: &str) -> PathBuf {
        self.config.entries_dir().join(entry_file_name(entry_id))
    }
}
