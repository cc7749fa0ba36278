pub mod error;
pub mod drift;

pub use error::{FileDriftError, Result};
pub use drift::{
    Digest, DIGEST_LEN, digest, digests_match,
    ChecksumRecord, ChangeDecision, DriftState,
    RecordStorage, FileStorage, MemoryStorage, load, save,
    DriftDetector, detect, read_content,
};
