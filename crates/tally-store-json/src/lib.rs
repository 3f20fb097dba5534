//! tally-store-json
//!
//! Filesystem JSON implementation of the tally-core store traits: one user
//! record and one history record file per identity, plus a best-effort
//! identity cache file. Stands in for the remote stores in offline and
//! test use. Writes go to a temporary file first and are renamed into
//! place.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use tally_config::Config;
use tally_core::{CoreError, HistoryStore, IdentityCache, UserStore};
use tally_domain::{HistoryRecord, UserRecord};

const RECORD_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const IDENTITY_FILE: &str = "identity";

/// Directory-backed store keeping `users/` and `history/` record files
/// under one base directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    users_dir: PathBuf,
    history_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let base = base.into();
        let users_dir = base.join("users");
        let history_dir = base.join("history");
        fs::create_dir_all(&users_dir).map_err(store_unavailable)?;
        fs::create_dir_all(&history_dir).map_err(store_unavailable)?;
        Ok(Self {
            users_dir,
            history_dir,
        })
    }

    /// Opens the store rooted at the configured data directory.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        Self::new(config.resolve_data_root())
    }

    pub fn user_path(&self, email: &str) -> PathBuf {
        self.users_dir
            .join(format!("{}.{}", identity_slug(email), RECORD_EXTENSION))
    }

    pub fn history_path(&self, email: &str) -> PathBuf {
        self.history_dir
            .join(format!("{}.{}", identity_slug(email), RECORD_EXTENSION))
    }
}

impl UserStore for JsonStore {
    fn fetch(&self, email: &str) -> Result<Option<UserRecord>, CoreError> {
        read_record(&self.user_path(email))
    }

    fn create(&self, record: &UserRecord) -> Result<UserRecord, CoreError> {
        write_record(&self.user_path(&record.email), record)?;
        Ok(record.clone())
    }

    fn replace(&self, email: &str, record: &UserRecord) -> Result<UserRecord, CoreError> {
        write_record(&self.user_path(email), record)?;
        Ok(record.clone())
    }
}

impl HistoryStore for JsonStore {
    fn fetch(&self, email: &str) -> Result<Option<HistoryRecord>, CoreError> {
        read_record(&self.history_path(email))
    }

    fn create(&self, record: &HistoryRecord) -> Result<HistoryRecord, CoreError> {
        write_record(&self.history_path(&record.email), record)?;
        Ok(record.clone())
    }

    fn replace(&self, email: &str, record: &HistoryRecord) -> Result<HistoryRecord, CoreError> {
        write_record(&self.history_path(email), record)?;
        Ok(record.clone())
    }
}

/// One-line file remembering the last active identity across restarts.
/// Every operation is best-effort; a missing or unreadable file simply
/// means no cached identity.
#[derive(Debug, Clone)]
pub struct FileIdentityCache {
    path: PathBuf,
}

impl FileIdentityCache {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            path: base.into().join(IDENTITY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityCache for FileIdentityCache {
    fn get(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let identity = contents.trim();
        if identity.is_empty() {
            None
        } else {
            Some(identity.to_owned())
        }
    }

    fn set(&self, email: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, email);
    }

    fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Maps an identity to a stable, collision-free filename: alphanumerics
/// pass through, every other byte becomes `_` plus its hex value, so
/// distinct identities never share a record file.
fn identity_slug(email: &str) -> String {
    let mut slug = String::with_capacity(email.len());
    for byte in email.bytes() {
        if byte.is_ascii_alphanumeric() {
            slug.push(byte as char);
        } else {
            slug.push('_');
            slug.push_str(&format!("{byte:02x}"));
        }
    }
    slug
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(store_unavailable)?;
    let record = serde_json::from_str(&data)
        .map_err(|err| CoreError::InvalidRecord(err.to_string()))?;
    Ok(Some(record))
}

fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|err| CoreError::InvalidRecord(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json).map_err(store_unavailable)?;
    fs::rename(&tmp, path).map_err(store_unavailable)?;
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".");
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

fn store_unavailable(err: std::io::Error) -> CoreError {
    CoreError::RemoteUnavailable(err.to_string())
}
