//! File-backed passcode store.
//!
//! Persists the passcode record as a small versioned CBOR document. Every
//! mutation rewrites the whole document through a temp-file-plus-rename, so
//! a crash mid-write leaves the previous record intact (the all-or-nothing
//! contract of [`PasscodeStore::set_passcode`]).

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use keyguard_core::{Passcode, PasscodeStore, StoreError};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    schema_version: u8,
    passcode: Option<Passcode>,
    failed_attempts: u32,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self { schema_version: SCHEMA_VERSION, passcode: None, failed_attempts: 0 }
    }
}

/// Passcode store backed by a CBOR document on disk.
///
/// Clones share the same path. Mutations are read-modify-write without file
/// locking: the lock's single-threaded driving model (one logical thread
/// per lock screen) is assumed here as well.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Arc<PathBuf>,
}

impl FileStore {
    /// Create a store persisting to `path`.
    ///
    /// The file is created lazily on the first mutation; a missing file
    /// reads as an empty record.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Arc::new(path.into()) }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument, StoreError> {
        let bytes = match fs::read(self.path.as_ref()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default());
            },
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };

        let document: StoreDocument = ciborium::from_reader(bytes.as_slice())
            .map_err(|err| StoreError::Serialization(err.to_string()))?;

        if document.schema_version != SCHEMA_VERSION {
            return Err(StoreError::Serialization(format!(
                "unsupported schema version {}",
                document.schema_version
            )));
        }

        Ok(document)
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let mut bytes = Vec::new();
        ciborium::into_writer(document, &mut bytes)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(|err| StoreError::Io(err.to_string()))?;
        fs::rename(&tmp, self.path.as_ref()).map_err(|err| StoreError::Io(err.to_string()))?;

        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut StoreDocument)) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        f(&mut document);
        self.write_document(&document)
    }
}

impl PasscodeStore for FileStore {
    fn passcode(&self) -> Result<Option<Passcode>, StoreError> {
        Ok(self.read_document()?.passcode)
    }

    fn set_passcode(&self, code: &Passcode) -> Result<(), StoreError> {
        self.update(|document| document.passcode = Some(code.clone()))
    }

    fn delete_passcode(&self) -> Result<(), StoreError> {
        self.update(|document| document.passcode = None)
    }

    fn failed_attempts(&self) -> Result<u32, StoreError> {
        Ok(self.read_document()?.failed_attempts)
    }

    fn record_failed_attempt(&self) -> Result<u32, StoreError> {
        let mut document = self.read_document()?;
        document.failed_attempts += 1;
        self.write_document(&document)?;

        Ok(document.failed_attempts)
    }

    fn reset_failed_attempts(&self) -> Result<(), StoreError> {
        self.update(|document| document.failed_attempts = 0)
    }
}
