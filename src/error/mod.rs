use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileDriftError {
    #[error("Checksum storage error at {location}: {source}")]
    Storage {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt checksum record at {location}: {reason}")]
    CorruptRecord {
        location: String,
        reason: String,
    },

    #[error("Failed to read content from {path}: {source}")]
    ContentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FileDriftError {
    pub fn storage(location: impl Into<String>, source: std::io::Error) -> Self {
        FileDriftError::Storage { location: location.into(), source }
    }

    pub fn corrupt(location: impl Into<String>, reason: impl ToString) -> Self {
        FileDriftError::CorruptRecord {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_corrupt_record(&self) -> bool {
        matches!(self, FileDriftError::CorruptRecord { .. })
    }
}

pub type Result<T> = std::result::Result<T, FileDriftError>;
