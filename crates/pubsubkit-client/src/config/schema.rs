use std::collections::HashSet;

use serde::Deserialize;
use pubsubkit_core::error::{PubSubError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub ingest: IngestSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PubSubError::UnsupportedVersion);
        }

        self.client.validate()?;
        self.ingest.validate()?;

        Ok(())
    }
}

/// Channels and users known before the first envelope arrives.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default)]
    pub channels: Vec<String>,

    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if self.channels.iter().any(|c| c.trim().is_empty()) {
            return Err(PubSubError::BadConfig(
                "client.channels must not contain empty names".into(),
            ));
        }

        let mut seen = HashSet::new();
        for u in &self.users {
            if !seen.insert(u.id) {
                return Err(PubSubError::BadConfig(format!(
                    "client.users has duplicate id {}",
                    u.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestSection {
    /// NDJSON file, or `-` for stdin.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Stop at the first rejected envelope instead of skipping it.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_line_bytes: default_max_line_bytes(),
            fail_fast: false,
        }
    }
}

impl IngestSection {
    pub fn validate(&self) -> Result<()> {
        if !(1024..=1_048_576).contains(&self.max_line_bytes) {
            return Err(PubSubError::BadConfig(
                "ingest.max_line_bytes must be between 1024 and 1048576".into(),
            ));
        }
        if self.path.is_empty() {
            return Err(PubSubError::BadConfig("ingest.path must not be empty".into()));
        }
        Ok(())
    }
}

fn default_path() -> String {
    "-".into()
}
fn default_max_line_bytes() -> usize {
    65536
}
