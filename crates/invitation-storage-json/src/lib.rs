//! invitation-storage-json
//!
//! Filesystem-backed JSON persistence for saved editing sessions.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use invitation_domain::ProgressiveData;

pub const SESSION_SCHEMA_VERSION: u32 = 1;
const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("session `{0}` not found")]
    NotFound(String),

    #[error("unsupported session schema version {0}")]
    UnsupportedSchema(u32),
}

/// On-disk envelope around [`ProgressiveData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default = "StoredSession::legacy_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub data: ProgressiveData,
}

impl StoredSession {
    pub fn new(data: ProgressiveData) -> Self {
        Self {
            schema_version: SESSION_SCHEMA_VERSION,
            saved_at: Some(Utc::now()),
            data,
        }
    }

    fn legacy_schema_version() -> u32 {
        SESSION_SCHEMA_VERSION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBackupInfo {
    pub session: String,
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Stores one JSON file per named session and keeps a bounded number of
/// timestamped backups of overwritten files.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    sessions_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonSessionStore {
    pub fn new(sessions_dir: PathBuf) -> Result<Self, StorageError> {
        let backups_dir = sessions_dir.join("backups");
        Self::with_retention(sessions_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        sessions_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&sessions_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            sessions_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    pub fn session_path(&self, name: &str) -> PathBuf {
        self.sessions_dir
            .join(format!("{}.{}", canonical_name(name), FILE_EXTENSION))
    }

    /// Writes `data` under `name`, backing up any previous file first.
    pub fn save(&self, name: &str, data: &ProgressiveData) -> Result<PathBuf, StorageError> {
        let path = self.session_path(name);
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        save_session_to_path(data, &path)?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<ProgressiveData, StorageError> {
        let path = self.session_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(canonical_name(name)));
        }
        load_session_from_path(&path)
    }

    /// Session names, sorted.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.sessions_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.session_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Backups of `name`, newest first.
    pub fn list_backups(&self, name: &str) -> Result<Vec<SessionBackupInfo>, StorageError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let session = canonical_name(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(SessionBackupInfo {
                    session: session.clone(),
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| (Reverse(info.created_at), Reverse(info.id.clone())));
        Ok(entries)
    }

    /// Copies a backup over the live session file and loads it.
    pub fn restore_backup(
        &self,
        name: &str,
        backup_id: &str,
    ) -> Result<ProgressiveData, StorageError> {
        let backup = self.backup_dir(name).join(backup_id);
        if !backup.exists() {
            return Err(StorageError::NotFound(backup_id.to_string()));
        }
        let target = self.session_path(name);
        fs::copy(&backup, &target)?;
        load_session_from_path(&target)
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<(), StorageError> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{}_{}.{}", canonical_name(name), timestamp, FILE_EXTENSION);
        fs::copy(path, dir.join(file_name))?;
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<(), StorageError> {
        for entry in self.list_backups(name)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

/// Saves progressive data to an arbitrary path through a temporary file.
pub fn save_session_to_path(data: &ProgressiveData, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&StoredSession::new(data.clone()))
        .map_err(|err| StorageError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_all(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads progressive data from `path`. Files without an envelope are read as
/// bare progressive data.
pub fn load_session_from_path(path: &Path) -> Result<ProgressiveData, StorageError> {
    let text = fs::read_to_string(path)?;
    let stored: StoredSession =
        serde_json::from_str(&text).map_err(|err| StorageError::Serde(err.to_string()))?;
    if stored.schema_version > SESSION_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchema(stored.schema_version));
    }
    Ok(stored.data)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "session".into()
    } else {
        sanitized
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    let mut segments = trimmed.rsplit('_');
    let time = segments.next()?;
    let date = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), StorageError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
