//! Persisted usage counter that gates how many searches may run.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::LeadsError;

/// Storage key holding the number of scans already used.
pub const SCANS_KEY: &str = "lf_scans_used";

/// Durable string key/value storage for client-side state.
pub trait ScanStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LeadsError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, LeadsError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`LeadsError`] if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), LeadsError>;
}

/// Process-lifetime storage; nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScanStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, LeadsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LeadsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a single JSON object on disk.
///
/// A missing file reads as empty. Every write rewrites the whole file and
/// creates parent directories as needed.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, LeadsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| LeadsError::StorageFormat {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn io_error(&self, source: std::io::Error) -> LeadsError {
        LeadsError::StorageIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ScanStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, LeadsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LeadsError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let body = serde_json::to_string_pretty(&values).map_err(|source| {
            LeadsError::StorageFormat {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|e| self.io_error(e))
    }
}

/// Counts scans used against a fixed allowance, persisting after every change.
#[derive(Debug)]
pub struct ScanCounter<S: ScanStorage> {
    storage: S,
    used: u32,
    max: u32,
}

impl<S: ScanStorage> ScanCounter<S> {
    /// Read the persisted count from `storage`.
    ///
    /// The leading integer of the stored text is used, so `"3abc"` reads as 3
    /// and `"1.5"` as 1. Missing, digitless, or negative values count as zero;
    /// values above `max` are clamped. The normalized value is written back.
    ///
    /// # Errors
    ///
    /// Returns [`LeadsError`] if the storage cannot be read or written.
    pub fn load(storage: S, max: u32) -> Result<Self, LeadsError> {
        let raw = storage.get(SCANS_KEY)?;
        let used = raw
            .as_deref()
            .and_then(leading_integer)
            .filter(|n| *n >= 0)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX).min(max));

        if raw.is_some() && raw.as_deref().map(str::trim) != Some(used.to_string().as_str()) {
            tracing::warn!(stored = ?raw, used, "normalized stored scan count");
        }

        let mut counter = Self { storage, used, max };
        counter.persist()?;
        Ok(counter)
    }

    #[must_use]
    pub fn used(&self) -> u32 {
        self.used
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.used)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    /// Display label, e.g. `"7/10 Scans"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{} Scans", self.remaining(), self.max)
    }

    /// Use one scan.
    ///
    /// Returns `false` without touching storage when no scans remain.
    ///
    /// # Errors
    ///
    /// Returns [`LeadsError`] if the new count cannot be persisted.
    pub fn consume(&mut self) -> Result<bool, LeadsError> {
        if self.is_exhausted() {
            return Ok(false);
        }
        self.used += 1;
        self.persist()?;
        tracing::info!(used = self.used, max = self.max, "consumed scan");
        Ok(true)
    }

    /// Give back the underlying storage, e.g. to reload it later.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<(), LeadsError> {
        self.storage.set(SCANS_KEY, &self.used.to_string())
    }
}

/// Optional sign followed by leading decimal digits, after leading whitespace.
///
/// Returns `None` when no digit follows. Saturates instead of overflowing.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: Option<i64> = None;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        let n = value.unwrap_or(0);
        value = Some(n.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    }

    value.map(|n| if negative { -n } else { n })
}

#[cfg(test)]
#[path = "scans_test.rs"]
mod tests;
