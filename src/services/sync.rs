//! Decide whether a local workflow document must be pushed before a query.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the trimmed document text.
pub fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.trim().as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut output, b| {
        let _ = std::fmt::write(&mut output, format_args!("{b:02x}"));
        output
    })
}

/// Outcome of comparing the stored hash with the current local document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// The local document is unchanged since the last push.
    UpToDate,
    /// The local document changed (or was never hashed); compare with the remote copy.
    CheckRemote { local_hash: String },
}

impl SyncDecision {
    pub fn evaluate(stored_hash: Option<&str>, local_text: &str) -> Self {
        let local_hash = content_hash(local_text);
        match stored_hash {
            Some(stored) if !stored.is_empty() && stored == local_hash => Self::UpToDate,
            _ => Self::CheckRemote { local_hash },
        }
    }
}

/// True when the remote copy differs from the local one (whitespace-trimmed).
pub fn needs_push(remote_text: Option<&str>, local_text: &str) -> bool {
    remote_text.unwrap_or_default().trim() != local_text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_trimmed_sha256() {
        // sha256("abc")
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(content_hash("abc"), expected);
        assert_eq!(content_hash("  abc\n"), expected);
        assert_eq!(content_hash("abc").len(), 64);
    }

    #[test]
    fn test_sync_decision() {
        let text = "version: 0.1\n";
        let hash = content_hash(text);
        assert_eq!(SyncDecision::evaluate(Some(&hash), text), SyncDecision::UpToDate);
        assert_eq!(
            SyncDecision::evaluate(None, text),
            SyncDecision::CheckRemote {
                local_hash: hash.clone()
            }
        );
        assert_eq!(
            SyncDecision::evaluate(Some(""), text),
            SyncDecision::CheckRemote { local_hash: hash }
        );
        assert!(matches!(
            SyncDecision::evaluate(Some("stale"), text),
            SyncDecision::CheckRemote { .. }
        ));
    }

    #[test]
    fn test_needs_push() {
        assert!(!needs_push(Some("a: 1\n"), "a: 1"));
        assert!(needs_push(Some("a: 2"), "a: 1"));
        assert!(needs_push(None, "a: 1"));
    }
}
