use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use crate::error::{FileDriftError, Result};
use super::checksum::{digest, digests_match};
use super::state::{ChangeDecision, ChecksumRecord, DriftState};
use super::store::{self, RecordStorage};

/// Compares content against the checksum record held by `storage` and
/// keeps that record up to date.
pub struct DriftDetector<S> {
    storage: S,
}

impl<S: RecordStorage> DriftDetector<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Runs one full check: load the prior record, decide, persist the new digest.
    pub fn check(&mut self, content: &[u8]) -> Result<ChangeDecision> {
        let prior = store::load(&self.storage)?;
        self.commit(content, prior.as_ref())
    }

    /// Same as [`check`](Self::check), reading the content from `path`.
    ///
    /// The prior record is loaded before the content is read, so a broken
    /// record store fails the run without touching the target.
    pub fn check_file(&mut self, path: impl AsRef<Path>) -> Result<ChangeDecision> {
        let prior = store::load(&self.storage)?;
        let content = read_content(path)?;
        self.commit(&content, prior.as_ref())
    }

    fn commit(&mut self, content: &[u8], prior: Option<&ChecksumRecord>) -> Result<ChangeDecision> {
        let decision = detect(content, prior);
        store::save(&mut self.storage, &decision.to_record())?;
        Ok(decision)
    }
}

/// Pure change decision for `content` against an optional prior record.
pub fn detect(content: &[u8], prior: Option<&ChecksumRecord>) -> ChangeDecision {
    let new_digest = digest(content);

    let state = match prior {
        None => {
            debug!("No prior checksum record; recording baseline");
            DriftState::Baseline
        }
        Some(record) => match record.digest() {
            // Older records may carry a null or empty hash.
            None => {
                warn!("Checksum record has no digest; treating as baseline");
                DriftState::Baseline
            }
            Some(stored) if digests_match(new_digest.as_bytes(), stored) => DriftState::Unchanged,
            Some(_) => DriftState::Changed,
        },
    };

    info!("Content digest {} ({})", new_digest, state.as_str());
    ChangeDecision::new(new_digest, state)
}

pub fn read_content(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| FileDriftError::ContentRead {
        path: path.display().to_string(),
        source,
    })
}
