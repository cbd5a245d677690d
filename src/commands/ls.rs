//! Listing command

use crate::config::StorageConfig;
use crate::lister::Lister;
use crate::types::{FileEntry, Listing, Root, SyncError};
use indicatif::HumanBytes;

/// Print the listing of one root
pub fn run(root: &Root, storage: &StorageConfig, json: bool) -> Result<(), SyncError> {
    let adapter = storage.storage();
    let filter = storage.filter()?;
    let listing = Lister::new(&adapter, &filter).list(root)?;

    let output = if json {
        format_json(&listing)?
    } else {
        format_table(&listing)
    };
    println!("{output}");
    Ok(())
}

fn sorted_entries(listing: &Listing) -> Vec<&FileEntry> {
    let mut entries: Vec<&FileEntry> = listing.iter().map(|(_, entry)| entry).collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

fn format_json(listing: &Listing) -> Result<String, SyncError> {
    serde_json::to_string_pretty(&sorted_entries(listing)).map_err(|err| SyncError::Io(err.into()))
}

fn format_table(listing: &Listing) -> String {
    let mut lines: Vec<String> = sorted_entries(listing)
        .into_iter()
        .map(|entry| {
            let size = entry
                .size
                .map(|s| HumanBytes(s).to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("{:>12}  {:<40}  {}", size, entry.hash().unwrap_or("-"), entry.path)
        })
        .collect();
    lines.push(format!(
        "{} files | {}",
        listing.total_files,
        HumanBytes(listing.total_size)
    ));
    lines.join("\n")
}
