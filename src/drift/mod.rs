mod checksum;
mod state;
mod store;
mod detector;

pub use checksum::{Digest, DIGEST_LEN, digest, digests_match};
pub use state::{ChecksumRecord, ChangeDecision, DriftState};
pub use store::{RecordStorage, FileStorage, MemoryStorage, load, save};
pub use detector::{DriftDetector, detect, read_content};
