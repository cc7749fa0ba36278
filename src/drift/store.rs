use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use crate::error::{FileDriftError, Result};
use super::state::ChecksumRecord;

/// Byte-level persistence for a single checksum record.
pub trait RecordStorage {
    /// Human readable location, used in error messages.
    fn location(&self) -> String;

    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the stored blob. Readers must never see a partial write.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<T: RecordStorage + ?Sized> RecordStorage for &mut T {
    fn location(&self) -> String {
        (**self).location()
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl RecordStorage for FileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Option<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { blob: Some(bytes.into()) }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }
}

impl RecordStorage for MemoryStorage {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.blob = Some(bytes.to_vec());
        Ok(())
    }
}

/// Reads the stored record. A missing or zero-length blob yields `None`.
pub fn load<S: RecordStorage + ?Sized>(storage: &S) -> Result<Option<ChecksumRecord>> {
    let location = storage.location();
    let bytes = storage.read()
        .map_err(|e| FileDriftError::storage(location.clone(), e))?;

    let bytes = match bytes {
        Some(b) if !b.is_empty() => b,
        _ => {
            debug!("No checksum record at {}", location);
            return Ok(None);
        }
    };

    let record: ChecksumRecord = serde_json::from_slice(&bytes)
        .map_err(|e| FileDriftError::corrupt(location.clone(), e))?;

    debug!("Loaded checksum record from {}", location);
    Ok(Some(record))
}

pub fn save<S: RecordStorage + ?Sized>(storage: &mut S, record: &ChecksumRecord) -> Result<()> {
    let bytes = serde_json::to_vec(record)?;

    let location = storage.location();
    storage.write(&bytes)
        .map_err(|e| FileDriftError::storage(location.clone(), e))?;

    debug!("Saved checksum record to {}", location);
    Ok(())
}
