// Remote classifier trait — the swap-ready abstraction.
//
// The local matcher needs no network and no credentials; delegating to a
// language model is an optional capability behind this trait, so the rest
// of the pipeline (and the tests) can substitute any implementation.

pub mod openai;

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::reference::ReferenceList;

/// Picks a reference code for an activity description via an external
/// text-generation service. Implementations must be async because providers
/// require HTTP API calls.
///
/// No confidence score is produced on this path. Each call is made at most
/// once; retry and timeout policy belongs to the caller.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Return the code the service selected for this activity, with
    /// surrounding whitespace already trimmed.
    async fn pick_code(
        &self,
        activity: &str,
        references: &ReferenceList,
    ) -> Result<String, RemoteError>;
}
