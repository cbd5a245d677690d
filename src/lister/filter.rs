//! Exclude patterns applied to listings

use crate::types::SyncError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Set of exclude globs, matched against paths relative to a root
///
/// Follows rclone's filter conventions closely enough for everyday use:
/// `*` stops at `/`, `**` crosses it, a leading `/` anchors the pattern to
/// the root, a trailing `/` excludes a whole directory, and unanchored
/// patterns match at any depth. `{{regex}}` blocks are rejected.
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PathFilter {
    /// Compile exclude patterns
    pub fn new(patterns: Vec<String>) -> Result<Self, SyncError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            if pattern.contains("{{") {
                return Err(SyncError::Config(format!(
                    "Invalid exclude pattern '{pattern}': regular expression blocks are not supported"
                )));
            }

            // A trailing `/` names a directory and hides everything below it
            let pattern_glob = match pattern.strip_suffix('/') {
                Some(dir) => format!("{dir}/**"),
                None => pattern.clone(),
            };
            let candidates = match pattern_glob.strip_prefix('/') {
                Some(anchored) => vec![anchored.to_string()],
                None => vec![pattern_glob.clone(), format!("**/{pattern_glob}")],
            };
            for candidate in candidates {
                let glob = GlobBuilder::new(&candidate)
                    .literal_separator(true)
                    .build()
                    .map_err(|err| {
                        SyncError::Config(format!("Invalid exclude pattern '{pattern}': {err}"))
                    })?;
                builder.add(glob);
            }
        }

        let set = builder
            .build()
            .map_err(|err| SyncError::Config(format!("Invalid exclude patterns: {err}")))?;

        Ok(Self { patterns, set })
    }

    /// Filter that excludes nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Check if `path` is hidden from synchronization
    pub fn is_excluded(&self, path: &str) -> bool {
        !self.patterns.is_empty() && self.set.is_match(path)
    }

    /// Patterns as given by the user
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::empty()
    }
}
