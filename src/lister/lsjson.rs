//! `lsjson` output parsing

use crate::types::FileEntry;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One record of `rclone lsjson --hash` output
///
/// Only the fields used here are declared. Everything else the tool emits
/// (`Name`, `ID`, `OrigID`, `Tier`, `Encrypted`, `Metadata`, ...) is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsJsonItem {
    path: String,

    /// `-1` when the backend does not know the size
    #[serde(default)]
    size: Option<i64>,

    #[serde(default)]
    mod_time: Option<DateTime<Utc>>,

    #[serde(default)]
    mime_type: Option<String>,

    #[serde(default)]
    is_dir: bool,

    #[serde(default)]
    hashes: Option<BTreeMap<String, String>>,
}

impl LsJsonItem {
    fn into_entry(self) -> FileEntry {
        let hashes = self
            .hashes
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, digest)| !digest.is_empty())
            .collect();

        FileEntry {
            path: self.path,
            size: self.size.and_then(|size| u64::try_from(size).ok()),
            mod_time: self.mod_time,
            mime_type: self.mime_type,
            hashes,
        }
    }
}

/// Parse `lsjson` stdout into file entries
///
/// The output must be a JSON array of records. Directory records are
/// dropped: only files take part in synchronization.
pub fn parse_lsjson(output: &[u8]) -> Result<Vec<FileEntry>, serde_json::Error> {
    let items: Vec<LsJsonItem> = serde_json::from_slice(output)?;
    Ok(items
        .into_iter()
        .filter(|item| !item.is_dir)
        .map(LsJsonItem::into_entry)
        .collect())
}
