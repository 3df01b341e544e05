//! JSON ledger file with exclusive read-modify-write
//!
//! A ledger is one JSON document on disk holding an entire collection.
//! Every mutation loads the current document, applies one change and
//! rewrites it while holding the ledger's lock, so concurrent writers never
//! lose each other's updates.
//!
//! Keep exactly one `JsonLedger` per file in a process: the lock lives in
//! the value, not on the file.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use modbot_core::DomainError;

/// A JSON document on disk guarded by an async mutex
pub struct JsonLedger<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonLedger<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Create a ledger backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document
    ///
    /// A missing, unreadable or corrupt file reads as an empty document.
    pub async fn read(&self) -> T {
        let _guard = self.lock.lock().await;

        match self.load().await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ledger unreadable, treating as empty"
                );
                T::default()
            }
        }
    }

    /// Apply one change to the document and persist it
    ///
    /// A missing file starts from an empty document. A file that exists but
    /// cannot be parsed fails with `StoreUnavailable` and is left untouched.
    /// If `apply` returns an error nothing is written.
    pub async fn update<R, F>(&self, apply: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut T) -> Result<R, DomainError>,
    {
        let _guard = self.lock.lock().await;

        let mut doc = self.load().await?;
        let result = apply(&mut doc)?;
        self.persist(&doc).await?;

        Ok(result)
    }

    async fn load(&self) -> Result<T, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Ledger file absent, starting empty");
                return Ok(T::default());
            }
            Err(e) => {
                return Err(DomainError::StoreUnavailable(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&raw)
            .map_err(|e| DomainError::StoreUnavailable(format!("{}: {e}", self.path.display())))
    }

    /// Write a sibling temp file, then rename it over the ledger
    async fn persist(&self, doc: &T) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(&e))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).await.map_err(|e| self.io_error(&e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(&e))?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, e: &std::io::Error) -> DomainError {
        DomainError::StorageError(format!("{}: {e}", self.path.display()))
    }
}
