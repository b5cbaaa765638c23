//! Data models for sidenote
//!
//! Defines the core data structures: entry records, summaries, the active
//! pointer, and the inputs accepted by the store operations. Field names
//! serialize in camelCase to match the on-disk JSON layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filename prefix for entry record files
pub const ENTRY_PREFIX: &str = "entry_";

/// Filename extension for entry record files
pub const ENTRY_EXTENSION: &str = ".json";

/// Width of the zero-padded sequence number in an entry ID
const SEQUENCE_WIDTH: usize = 5;

/// Workflow status of an entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Todo,
    Doing,
    Done,
}

impl EntryStatus {
    /// Whether this status counts as still-open (kept by the default list filter)
    pub fn is_open(&self) -> bool {
        matches!(self, EntryStatus::Todo | EntryStatus::Doing)
    }

    /// The lowercase wire name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Todo => "todo",
            EntryStatus::Doing => "doing",
            EntryStatus::Done => "done",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(EntryStatus::Todo),
            "doing" => Ok(EntryStatus::Doing),
            "done" => Ok(EntryStatus::Done),
            other => Err(format!(
                "invalid status '{}' (expected todo, doing, or done)",
                other
            )),
        }
    }
}

/// One persisted unit of work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    /// Unique identifier: `entry_` + 5-digit zero-padded sequence number
    pub entry_id: String,
    /// Display title, fixed at creation
    pub title: String,
    /// Free-form note body, may be empty
    pub note: String,
    /// Workflow status
    pub status: EntryStatus,
    /// When this entry was created
    pub created_at: DateTime<Utc>,
    /// When this entry was last mutated
    pub updated_at: DateTime<Utc>,
}

impl EntryRecord {
    /// Create a new entry with the given ID and title
    ///
    /// Status starts at `todo`; `created_at` and `updated_at` are set to
    /// the same instant.
    pub fn new(entry_id: impl Into<String>, title: impl Into<String>, note: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            entry_id: entry_id.into(),
            title: title.into(),
            note: note.unwrap_or_default(),
            status: EntryStatus::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an update onto this record, refreshing `updated_at`
    ///
    /// An explicitly supplied empty note clears the note. The title is
    /// immutable and never touched.
    pub fn apply_update(&mut self, update: &UpdateEntryInput) {
        if let Some(ref note) = update.note {
            self.note = note.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }

    /// Project the lightweight listing fields
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            entry_id: self.entry_id.clone(),
            title: self.title.clone(),
            status: self.status,
            updated_at: self.updated_at,
        }
    }
}

/// Lightweight projection of an entry for listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub entry_id: String,
    pub title: String,
    pub status: EntryStatus,
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted when creating an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryInput {
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl CreateEntryInput {
    /// Create an input with a title and no note
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: None,
        }
    }

    /// Attach a note to this input
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Payload accepted when updating an entry
///
/// Both fields are optional, but at least one must be supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntryInput {
    pub note: Option<String>,
    pub status: Option<EntryStatus>,
}

impl UpdateEntryInput {
    /// Whether this update specifies no field at all
    pub fn is_empty(&self) -> bool {
        self.note.is_none() && self.status.is_none()
    }
}

/// Persisted shape of the active-entry pointer file
///
/// A weak reference: deleting the target record clears this pointer rather
/// than leaving it dangling. `updatedAt` records the last switch and is
/// tolerated absent when reading older pointer files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivePointer {
    pub entry_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Format a sequence number as an entry ID (`entry_00007`)
pub fn format_entry_id(sequence: u64) -> String {
    format!("{}{:0width$}", ENTRY_PREFIX, sequence, width = SEQUENCE_WIDTH)
}

/// Filename of the record file for an entry ID
pub fn entry_file_name(entry_id: &str) -> String {
    format!("{}{}", entry_id, ENTRY_EXTENSION)
}

/// Parse the sequence number out of an entry record filename
///
/// Returns `None` for anything that is not `entry_<digits>.json`.
pub fn parse_entry_sequence(file_name: &str) -> Option<u64> {
    let numeric = file_name
        .strip_prefix(ENTRY_PREFIX)?
        .strip_suffix(ENTRY_EXTENSION)?;

    if numeric.is_empty() {
        return None;
    }

    numeric.parse().ok()
}
