//! Active-entry command handlers

use anyhow::Result;

use sidenote_core::EntryStore;

use crate::output::Output;

/// Show the currently active entry
pub async fn show(store: &EntryStore, output: &Output) -> Result<()> {
    let record = store.active().get_active().await?;
    output.print_active(record.as_ref());

    if record.is_none() && !output.is_quiet() && !output.is_json() {
        println!("View: {}", store.config().active_view_path().display());
    }

    Ok(())
}

/// Switch the active entry to the given ID
pub async fn set(store: &EntryStore, id: String, output: &Output) -> Result<()> {
    let record = store.active().set_active(Some(&id)).await?;
    output.print_active(record.as_ref());
    Ok(())
}

/// Clear the active entry
pub async fn clear(store: &EntryStore, output: &Output) -> Result<()> {
    store.active().set_active(None).await?;
    output.success("Cleared active entry");
    output.print_active(None);
    Ok(())
}
