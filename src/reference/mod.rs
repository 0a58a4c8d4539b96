// ISIC reference list — the fixed table every classification runs against.
//
// Loaded once per process from a semicolon-delimited file and never mutated
// afterwards, so it can be shared by reference across any number of
// classification calls. Source line order is preserved: the matcher's
// tie-break gives the first maximal entry the win, so order matters.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Error;

/// One `code;description` record from the reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub code: String,
    pub description: String,
}

/// An ordered, read-only list of reference entries.
///
/// Duplicate codes are passed through unchanged — under the matcher's
/// strictly-greater selection rule the first occurrence wins, which is the
/// intended behavior. Callers that need unique codes deduplicate upstream.
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceList {
    /// Load entries from a semicolon-delimited file, one record per line,
    /// no header. Both fields are trimmed independently; blank lines are
    /// skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(';').collect();
            let [code, description] = fields.as_slice() else {
                return Err(Error::MalformedRecord {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    record: line.to_string(),
                });
            };
            entries.push(ReferenceEntry {
                code: code.trim().to_string(),
                description: description.trim().to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Build a list from in-memory entries. Used by tests and by callers
    /// that source the table from somewhere other than a file.
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `code: description` block handed to the remote classifier.
    ///
    /// Deterministic for a given list — the remote prompt and the local
    /// matcher see exactly the same table, in the same order.
    pub fn prompt_options(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = write!(out, "{}: {}", entry.code, entry.description);
        }
        out
    }
}
