//! Entry command handlers

use anyhow::{bail, Context, Result};
use std::path::Path;

use sidenote_core::{CreateEntryInput, EntryStatus, EntryStore, UpdateEntryInput};

use crate::output::Output;

/// Create one or more entries
///
/// Either a `--title` (with optional `--note`) or a `--file` pointing at a
/// JSON array of `{title, note?}` objects.
pub async fn create(
    store: &EntryStore,
    title: Option<String>,
    note: Option<String>,
    file: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let inputs = match file {
        Some(path) => read_inputs_file(path).await?,
        None => {
            let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
                bail!("Provide a --title, or a --file with entry definitions");
            };
            vec![CreateEntryInput { title, note }]
        }
    };

    let records = store.create_entries(&inputs).await?;
    let ids: Vec<String> = records.iter().map(|r| r.entry_id.clone()).collect();

    output.success(&format!("Created {} entry(ies)", ids.len()));
    output.print_ids("Created", &ids);

    Ok(())
}

/// List entry summaries
pub async fn list(store: &EntryStore, include_done: bool, output: &Output) -> Result<()> {
    let summaries = store.list_summaries(include_done).await?;
    output.print_summaries(&summaries);
    Ok(())
}

/// Update an entry's note and/or status
pub async fn update(
    store: &EntryStore,
    id: String,
    note: Option<String>,
    status: Option<EntryStatus>,
    output: &Output,
) -> Result<()> {
    let record = store
        .update_entry(&id, &UpdateEntryInput { note, status })
        .await?;

    output.success(&format!("Updated {}", record.entry_id));
    output.print_record(&record);

    Ok(())
}

/// Delete entries by ID
///
/// IDs come from positional arguments, a `--file` containing a JSON array
/// of strings, or both.
pub async fn delete(
    store: &EntryStore,
    mut ids: Vec<String>,
    file: Option<&Path>,
    output: &Output,
) -> Result<()> {
    if let Some(path) = file {
        ids.extend(read_ids_file(path).await?);
    }

    let deleted = store.delete_entries(&ids).await?;

    output.success(&format!("Deleted {} entry(ies)", deleted.len()));
    output.print_ids("Deleted", &deleted);

    Ok(())
}

/// Read entry definitions from a JSON array file
async fn read_inputs_file(path: &Path) -> Result<Vec<CreateEntryInput>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read entry file: {:?}", path))?;

    let inputs: Vec<CreateEntryInput> = serde_json::from_str(&content)
        .with_context(|| format!("Expected a JSON array of {{title, note?}} in {:?}", path))?;

    if inputs.iter().any(|input| input.title.trim().is_empty()) {
        bail!("Every entry definition in {:?} needs a non-empty title", path);
    }

    Ok(inputs)
}

/// Read entry IDs from a JSON array file
async fn read_ids_file(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read ID file: {:?}", path))?;

    let ids: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("Expected a JSON array of entry IDs in {:?}", path))?;

    Ok(ids)
}
