//! Active-entry pointer and view
//!
//! At most one entry is "active" at a time. The pointer lives in
//! `active.json`; every pointer-affecting change also regenerates the
//! Markdown view at `views/active-entry.md` so the two never drift apart.
//!
//! The pointer is advisory: a missing or unparsable pointer file reads as
//! "no active entry" rather than failing, and a pointer whose target record
//! has been deleted resolves to none. The view is pure derived state and is
//! always fully rewritten, never read back.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::fs_util::{atomic_write, read_opt, remove_if_exists, write_json_pretty};
use crate::models::{entry_file_name, ActivePointer, EntryRecord};

/// Owns the pointer file and the regenerated active-entry view
///
/// Holds its own `Config` so tests can isolate instances; resolves entry
/// IDs by reading record files directly from the entries directory.
#[derive(Debug, Clone)]
pub struct ActivePointerStore {
    config: Config,
}

impl ActivePointerStore {
    /// Create a pointer store rooted at the configured base directory
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Read the raw pointer file
    ///
    /// Absent or unparsable content reads as `None`. This degradation is
    /// deliberate: the pointer is advisory and must never take the store
    /// down with it.
    pub async fn read_pointer(&self) -> StoreResult<Option<ActivePointer>> {
        let Some(bytes) = read_opt(&self.config.active_file()).await? else {
            return Ok(None);
        };

        Ok(serde_json::from_slice(&bytes).ok())
    }

    /// Resolve the current active entry to its full record
    ///
    /// Returns `None` when no pointer is set or when the pointed-to record
    /// no longer exists. A stale pointer is not repaired by this read path.
    pub async fn get_active(&self) -> StoreResult<Option<EntryRecord>> {
        let Some(pointer) = self.read_pointer().await? else {
            return Ok(None);
        };

        self.read_entry(&pointer.entry_id).await
    }

    /// Switch the active entry, or clear it with `None`
    ///
    /// Clearing removes the pointer file (idempotently) and rewrites the
    /// view as "(none)". Setting resolves the ID first and fails with
    /// `NotFound` without touching the pointer when the entry is missing;
    /// on success the pointer and view are both rewritten.
    pub async fn set_active(&self, entry_id: Option<&str>) -> StoreResult<Option<EntryRecord>> {
        let switched_at = Utc::now();

        let Some(entry_id) = entry_id else {
            remove_if_exists(&self.config.active_file()).await?;
            self.write_view(None, switched_at).await?;
            debug!("cleared active entry");
            return Ok(None);
        };

        let record = self
            .read_entry(entry_id)
            .await?
            .ok_or_else(|| StoreError::not_found(entry_id))?;

        let pointer = ActivePointer {
            entry_id: record.entry_id.clone(),
            updated_at: Some(switched_at),
        };
        write_json_pretty(&self.config.active_file(), &pointer).await?;
        self.write_view(Some(&record), switched_at).await?;
        debug!(entry_id = %record.entry_id, "switched active entry");

        Ok(Some(record))
    }

    /// Re-derive the view after an in-place update of the active entry
    ///
    /// Called by the entry store once an update commits. The same entry
    /// stays active and keeps its original switch timestamp; only the
    /// rendered record fields change. A no-op when some other entry (or
    /// none) is active.
    pub async fn refresh_view_if_active(&self, record: &EntryRecord) -> StoreResult<()> {
        let Some(pointer) = self.read_pointer().await? else {
            return Ok(());
        };

        if pointer.entry_id == record.entry_id {
            let switched_at = pointer.updated_at.unwrap_or_else(Utc::now);
            self.write_view(Some(record), switched_at).await?;
        }

        Ok(())
    }

    /// Clear the pointer if it references any of the given (deleted) IDs
    ///
    /// Called by the entry store once a batch delete commits, so the
    /// pointer never dangles at a removed record.
    pub async fn clear_if_active(&self, entry_ids: &[String]) -> StoreResult<()> {
        let Some(pointer) = self.read_pointer().await? else {
            return Ok(());
        };

        if entry_ids.iter().any(|id| *id == pointer.entry_id) {
            self.set_active(None).await?;
        }

        Ok(())
    }

    /// Read an entry record from the entries directory
    ///
    /// Missing and malformed records both resolve to `None` here: for the
    /// pointer's purposes an unreadable target is the same as a deleted
    /// one. The entry store's own read path stays strict.
    async fn read_entry(&self, entry_id: &str) -> StoreResult<Option<EntryRecord>> {
        let Some(bytes) = read_opt(&self.entry_path(entry_id)).await? else {
            return Ok(None);
        };

        Ok(serde_json::from_slice(&bytes).ok())
    }

    async fn write_view(
        &self,
        record: Option<&EntryRecord>,
        switched_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let markdown = render_view(record, switched_at);
        atomic_write(&self.config.active_view_path(), markdown.as_bytes()).await
    }

    fn entry_path(&self, entry_id: &str) -> PathBuf {
        self.config.entries_dir().join(entry_file_name(entry_id))
    }
}

/// Render the active-entry view document
///
/// Pure function of the record (or absence of one) and the switch
/// timestamp, so the view is fully determined by pointer state.
pub fn render_view(record: Option<&EntryRecord>, switched_at: DateTime<Utc>) -> String {
    let switched = switched_at.to_rfc3339();

    match record {
        None => format!(
            "# Active Entry: (none)\n\
             Last Switched: {switched}\n\
             \n\
             No active entry is currently set.\n"
        ),
        Some(record) => {
            let note = if record.note.trim().is_empty() {
                "(none)"
            } else {
                record.note.as_str()
            };
            format!(
                "# Active Entry: [{id}] {title}\n\
                 Status: {status}\n\
                 Last Updated: {updated}\n\
                 Last Switched: {switched}\n\
                 \n\
                 ## Note\n\
                 {note}\n",
                id = record.entry_id,
                title = record.title,
                status = record.status,
                updated = record.updated_at.to_rfc3339(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateEntryInput;
    use crate::store::EntryStore;
    use tempfile::TempDir;
    use tokio::fs;

    fn stores(temp_dir: &TempDir) -> (EntryStore, ActivePointerStore) {
        let config = Config::new(temp_dir.path());
        (
            EntryStore::new(config.clone()),
            ActivePointerStore::new(config),
        )
    }

    #[tokio::test]
    async fn test_get_active_without_pointer() {
        let temp_dir = TempDir::new().unwrap();
        let (_, active) = stores(&temp_dir);

        assert!(active.get_active().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_and_get_active() {
        let temp_dir = TempDir::new().unwrap();
        let (store, active) = stores(&temp_dir);

        let records = store
            .create_entries(&[CreateEntryInput::new("Ship release").with_note("cut branch")])
            .await
            .unwrap();
        let entry_id = records[0].entry_id.clone();

        let set = active.set_active(Some(&entry_id)).await.unwrap().unwrap();
        assert_eq!(set.entry_id, entry_id);

        let resolved = active.get_active().await.unwrap().unwrap();
        assert_eq!(resolved.title, "Ship release");

        // Pointer file exists with the entry ID and a switch timestamp
        let pointer = active.read_pointer().await.unwrap().unwrap();
        assert_eq!(pointer.entry_id, entry_id);
        assert!(pointer.updated_at.is_some());

        // View reflects the full record
        let view = fs::read_to_string(temp_dir.path().join("views/active-entry.md"))
            .await
            .unwrap();
        assert!(view.contains(&format!("# Active Entry: [{}] Ship release", entry_id)));
        assert!(view.contains("Status: todo"));
        assert!(view.contains("cut branch"));
    }

    #[tokio::test]
    async fn test_set_active_unknown_entry() {
        let temp_dir = TempDir::new().unwrap();
        let (_, active) = stores(&temp_dir);

        let err = active.set_active(Some("entry_99999")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("entry_99999"));

        // Failed switch leaves no pointer behind
        assert!(active.read_pointer().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_previous_pointer() {
        let temp_dir = TempDir::new().unwrap();
        let (store, active) = stores(&temp_dir);

        let records = store
            .create_entries(&[CreateEntryInput::new("Keep me")])
            .await
            .unwrap();
        active
            .set_active(Some(&records[0].entry_id))
            .await
            .unwrap();

        assert!(active.set_active(Some("entry_99999")).await.is_err());

        let pointer = active.read_pointer().await.unwrap().unwrap();
        assert_eq!(pointer.entry_id, records[0].entry_id);
    }

    #[tokio::test]
    async fn test_clear_removes_pointer_and_resets_view() {
        let temp_dir = TempDir::new().unwrap();
        let (store, active) = stores(&temp_dir);

        let records = store
            .create_entries(&[CreateEntryInput::new("Short-lived")])
            .await
            .unwrap();
        active
            .set_active(Some(&records[0].entry_id))
            .await
            .unwrap();

        assert!(active.set_active(None).await.unwrap().is_none());

        assert!(!temp_dir.path().join("active.json").exists());
        let view = fs::read_to_string(temp_dir.path().join("views/active-entry.md"))
            .await
            .unwrap();
        assert!(view.contains("# Active Entry: (none)"));
        assert!(view.contains("No active entry is currently set."));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let (_, active) = stores(&temp_dir);

        // Clearing with no pointer set is not an error
        assert!(active.set_active(None).await.unwrap().is_none());
        assert!(active.set_active(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_pointer_degrades_to_none() {
        let temp_dir = TempDir::new().unwrap();
        let (_, active) = stores(&temp_dir);

        fs::write(temp_dir.path().join("active.json"), b"{ not json")
            .await
            .unwrap();

        assert!(active.read_pointer().await.unwrap().is_none());
        assert!(active.get_active().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stale_pointer_resolves_to_none_without_repair() {
        let temp_dir = TempDir::new().unwrap();
        let (store, active) = stores(&temp_dir);

        let records = store
            .create_entries(&[CreateEntryInput::new("Doomed")])
            .await
            .unwrap();
        let entry_id = records[0].entry_id.clone();
        active.set_active(Some(&entry_id)).await.unwrap();

        // Remove the record file out from under the pointer
        fs::remove_file(
            temp_dir
                .path()
                .join("entries")
                .join(format!("{}.json", entry_id)),
        )
        .await
        .unwrap();

        assert!(active.get_active().await.unwrap().is_none());
        // The read path does not delete the stale pointer file
        assert!(temp_dir.path().join("active.json").exists());
    }

    #[test]
    fn test_render_view_none() {
        let switched_at = Utc::now();
        let view = render_view(None, switched_at);

        assert!(view.starts_with("# Active Entry: (none)\n"));
        assert!(view.contains(&format!("Last Switched: {}", switched_at.to_rfc3339())));
        assert!(view.ends_with("No active entry is currently set.\n"));
    }

    #[test]
    fn test_render_view_blank_note_placeholder() {
        let mut record = EntryRecord::new("entry_00004", "Quiet entry", None);
        record.note = "   \n".to_string();

        let view = render_view(Some(&record), Utc::now());
        assert!(view.contains("## Note\n(none)\n"));
    }

    #[test]
    fn test_render_view_note_verbatim() {
        let record = EntryRecord::new(
            "entry_00004",
            "Noisy entry",
            Some("line one\nline two".to_string()),
        );

        let view = render_view(Some(&record), Utc::now());
        assert!(view.contains("## Note\nline one\nline two\n"));
    }
}
