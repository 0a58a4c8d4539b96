use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars (never hardcoded). A .env file is loaded
/// automatically at startup via dotenvy.
pub struct Config {
    /// Default API key for the remote classifier (OPENAI_API_KEY).
    pub openai_api_key: String,
    /// Reference list path (TAXON_REFERENCE, default data/isic.csv).
    pub reference_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables. Nothing is required
    /// up front — the remote path validates its key via `require_api_key`.
    pub fn load() -> Result<Self> {
        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            reference_path: env::var("TAXON_REFERENCE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/isic.csv")),
        })
    }

    /// Check that an API key is available for the remote classifier.
    /// Call this before any operation that goes through the remote path.
    pub fn require_api_key(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY not set. Add it to your .env file or pass --api-key.");
        }
        Ok(())
    }
}
