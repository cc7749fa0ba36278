use serde::{Deserialize, Serialize};
use super::checksum::Digest;

/// The last known digest of a monitored target, as persisted between runs.
///
/// `hash` is `None` for a record that exists but was never populated
/// (`{"hash": null}`, `{}` or an empty string). That state is kept apart
/// from "no record at all", which is represented by the caller holding
/// `Option<ChecksumRecord>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChecksumRecord {
    #[serde(default, with = "hash_base64")]
    pub hash: Option<Vec<u8>>,
}

impl ChecksumRecord {
    pub fn new(digest: Digest) -> Self {
        Self {
            hash: Some(digest.as_bytes().to_vec()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn digest(&self) -> Option<&[u8]> {
        self.hash.as_deref().filter(|h| !h.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.digest().is_none()
    }
}

impl From<Digest> for ChecksumRecord {
    fn from(digest: Digest) -> Self {
        Self::new(digest)
    }
}

mod hash_base64 {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match hash {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded {
            None => Ok(None),
            Some(s) => {
                let bytes = STANDARD.decode(s.as_bytes())
                    .map_err(|e| serde::de::Error::custom(format!("invalid base64 hash: {}", e)))?;
                Ok(if bytes.is_empty() { None } else { Some(bytes) })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftState {
    /// No usable prior digest; this run establishes the baseline.
    Baseline,
    Unchanged,
    Changed,
}

impl DriftState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftState::Baseline => "baseline",
            DriftState::Unchanged => "unchanged",
            DriftState::Changed => "changed",
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, DriftState::Changed)
    }
}

/// Outcome of one detection pass: the freshly computed digest to persist,
/// and whether it differs from the previously stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeDecision {
    pub digest: Digest,
    pub state: DriftState,
    pub changed: bool,
}

impl ChangeDecision {
    pub fn new(digest: Digest, state: DriftState) -> Self {
        Self {
            digest,
            state,
            changed: state.is_changed(),
        }
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn to_record(&self) -> ChecksumRecord {
        ChecksumRecord::new(self.digest)
    }
}
