//! # Checksum Manifest
//!
//! Parses `SHA256SUMS` files: one `"<hex digest> <file name>"` record per
//! line, whitespace-delimited, extra fields ignored. Lines are fed one at a
//! time so the caller can stream the manifest instead of buffering it.

use std::collections::HashMap;

use crate::error::ChecksumError;

/// Mapping from file name to lowercase hex SHA-256 digest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole manifest held in memory.
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::new();
        for line in text.lines() {
            manifest.push_line(line);
        }
        manifest
    }

    /// Add one manifest line. Blank lines and lines with fewer than two
    /// fields are skipped. A later record for the same file wins.
    pub fn push_line(&mut self, line: &str) {
        let mut fields = line.split_whitespace();
        let (Some(digest), Some(file)) = (fields.next(), fields.next()) else {
            if !line.trim().is_empty() {
                tracing::debug!(line, "skipping checksum manifest line without a file name");
            }
            return;
        };
        // `sha256sum -b` marks binary mode with a leading '*'.
        let file = file.strip_prefix('*').unwrap_or(file);
        self.entries
            .insert(file.to_string(), digest.to_ascii_lowercase());
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Digest for `file`.
    ///
    /// An exact key wins. Otherwise a key ending in `/{file}` is accepted,
    /// so manifests listing files under a directory still resolve. When
    /// several keys share that suffix, whichever the map yields first is
    /// returned.
    pub fn digest_for(&self, file: &str) -> Result<&str, ChecksumError> {
        if let Some(digest) = self.entries.get(file) {
            return Ok(digest);
        }
        self.entries
            .iter()
            .find(|(name, _)| {
                name.strip_suffix(file)
                    .is_some_and(|head| head.ends_with('/'))
            })
            .map(|(_, digest)| digest.as_str())
            .ok_or_else(|| ChecksumError::DigestNotFound {
                file: file.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINARY: &str = "terraform-provider-foo_1.0.0_linux_amd64.zip";

    #[test]
    fn exact_lookup() {
        let manifest = ChecksumManifest::parse(&format!("deadbeef  {BINARY}\n"));
        assert_eq!(manifest.digest_for(BINARY).unwrap(), "deadbeef");
    }

    #[test]
    fn suffix_lookup_through_directory_prefix() {
        let manifest = ChecksumManifest::parse(&format!("deadbeef  dist/{BINARY}\n"));
        assert_eq!(manifest.digest_for(BINARY).unwrap(), "deadbeef");
    }

    #[test]
    fn suffix_lookup_requires_path_boundary() {
        let manifest = ChecksumManifest::parse(&format!("deadbeef  x{BINARY}\n"));
        assert!(manifest.digest_for(BINARY).is_err());
    }

    #[test]
    fn missing_file_is_digest_not_found() {
        let manifest = ChecksumManifest::parse("abc  other.zip\n");
        assert_eq!(
            manifest.digest_for(BINARY),
            Err(ChecksumError::DigestNotFound {
                file: BINARY.to_string()
            })
        );
    }

    #[test]
    fn digests_are_lowercased() {
        let manifest = ChecksumManifest::parse(&format!("DEADBEEF {BINARY}"));
        assert_eq!(manifest.digest_for(BINARY).unwrap(), "deadbeef");
    }

    #[test]
    fn malformed_and_blank_lines_are_skipped() {
        let text = format!("\n   \nlonely\naa {BINARY} trailing fields\n*bb other.zip\n");
        let manifest = ChecksumManifest::parse(&text);
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.digest_for(BINARY).unwrap(), "aa");
    }

    #[test]
    fn binary_mode_marker_is_stripped() {
        let mut manifest = ChecksumManifest::new();
        manifest.push_line(&format!("cafe *{BINARY}"));
        assert_eq!(manifest.digest_for(BINARY).unwrap(), "cafe");
    }

    #[test]
    fn line_order_is_irrelevant() {
        let a = ChecksumManifest::parse("11 a.zip\n22 b.zip\n");
        let b = ChecksumManifest::parse("22 b.zip\n11 a.zip\n");
        assert_eq!(a, b);
    }
}
