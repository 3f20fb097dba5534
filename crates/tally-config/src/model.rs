use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for budget and history records.
    /// Defaults to `<platform data dir>/tally`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("tally")
    }
}
