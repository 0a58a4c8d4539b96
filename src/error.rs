// Error taxonomy for the classification library.
//
// The binary wraps these in anyhow at the edge, but library callers need to
// tell failure classes apart: a missing file, a bad reference record, a batch
// file without the activity column, and a remote API failure all demand
// different handling. Local classification itself never fails on well-formed
// string input.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Reference or batch file missing, unreadable, or unwritable.
    #[error("cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference line did not split into exactly `code;description`.
    #[error("malformed reference record at {path}:{line}: expected `code;description`, got {record:?}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        record: String,
    },

    /// The batch input header lacks the activity-text column. Detected
    /// before any row is classified.
    #[error("required column {column:?} not found in input header")]
    MissingColumn { column: String },

    /// A malformed row in the batch input or a write failure on output.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Failures from the external language-model classifier. Never downgraded to
/// a local score — the caller decides whether a row or the whole batch dies.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no API key configured: set OPENAI_API_KEY or pass --api-key")]
    MissingCredential,

    #[error("request to completion endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion response was not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("completion response contained no choices")]
    EmptyResponse,
}
