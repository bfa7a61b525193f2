//! Artifact content digests.
//!
//! Digests are used for integrity reporting and for detecting unintended
//! artifact drift between runs: identical bytes always yield an identical
//! digest.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowercase hex MD5 digest of one artifact's bytes.
///
/// # Format
///
/// 32 hex characters, no separators, e.g. `"5eb63bbbe01eeed093cb22bb8f5acdc3"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactDigest(pub String);

impl fmt::Display for ArtifactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Digest a file's contents.
///
/// Streams the file in 8 KiB chunks so large binaries never need to fit in
/// memory. A missing file is [`Error::ArtifactMissing`]; any other read
/// failure is [`Error::ArtifactUnreadable`].
pub fn hash_artifact(path: &Path) -> Result<ArtifactDigest> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ArtifactMissing {
            path: path.to_path_buf(),
        },
        _ => Error::ArtifactUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| Error::ArtifactUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ArtifactDigest(format!("{:x}", hasher.finalize())))
}

/// Digest arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ArtifactDigest {
    let mut hasher = Md5::new();
    hasher.update(data);
    ArtifactDigest(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn known_digest() {
        let digest = hash_bytes(b"hello world");
        assert_eq!(digest.0, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn file_digest_matches_byte_digest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("artifact.dll");
        fs::write(&path, b"hello world").unwrap();

        let digest = hash_artifact(&path).unwrap();
        assert_eq!(digest, hash_bytes(b"hello world"));
        assert_eq!(digest.0.len(), 32);
    }

    #[test]
    fn identical_bytes_identical_digest() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.dll");
        let b = temp.path().join("b.dll");
        fs::write(&a, b"same content").unwrap();
        fs::write(&b, b"same content").unwrap();

        assert_eq!(hash_artifact(&a).unwrap(), hash_artifact(&b).unwrap());
    }

    #[test]
    fn single_byte_mutation_changes_digest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("artifact.dll");

        fs::write(&path, b"same content").unwrap();
        let before = hash_artifact(&path).unwrap();

        fs::write(&path, b"same_content").unwrap();
        let after = hash_artifact(&path).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn missing_file_is_artifact_missing() {
        let temp = tempdir().unwrap();
        let result = hash_artifact(&temp.path().join("nope.dll"));

        assert!(matches!(result, Err(Error::ArtifactMissing { .. })));
    }
}
