//! # Error Types
//!
//! Structured errors for the translation engine, built with `thiserror`.
//! Each parser owns its error enum; the store layer wraps them.

use std::fmt;

use thiserror::Error;

/// Failure to decode a raw store version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The raw version did not split into exactly three fields.
    #[error("invalid version format: {raw:?} (expected {{version}}-{{os}}-{{arch}}, found {fields} field(s))")]
    InvalidVersionFormat { raw: String, fields: usize },
}

/// Failure to resolve a digest from a checksum manifest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// The queried file has no entry in the manifest.
    #[error("digest not found in checksum manifest for {file}")]
    DigestNotFound { file: String },
}

/// Failure to turn a key file into exactly one signing key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyRingError {
    /// The key ring decoded to zero or more than one key entity.
    /// Undecodable input counts as zero entities.
    #[error("malformed key ring: contains {count} key entities, wanted 1")]
    MalformedKeyRing { count: usize },

    /// The armor text is not valid UTF-8 and cannot be carried verbatim.
    #[error("key ring armor is not valid UTF-8")]
    NotUtf8,
}

/// Every [`CodecError`] collected while decoding a version listing.
///
/// Decoding continues past a bad entry, so this travels alongside the
/// partial result instead of replacing it. Displays one failure per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeFailures {
    errors: Vec<CodecError>,
}

impl DecodeFailures {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure.
    pub fn push(&mut self, err: CodecError) {
        self.errors.push(err);
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Recorded failures in listing order.
    pub fn errors(&self) -> &[CodecError] {
        &self.errors
    }

    /// `None` when empty, otherwise `Some(self)`.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for DecodeFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeFailures {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_joins_messages_per_line() {
        let mut failures = DecodeFailures::new();
        failures.push(CodecError::InvalidVersionFormat {
            raw: "bad".into(),
            fields: 1,
        });
        failures.push(CodecError::InvalidVersionFormat {
            raw: "1-0-0-extra".into(),
            fields: 4,
        });
        let text = failures.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"bad\""));
        assert!(lines[1].contains("\"1-0-0-extra\""));
    }

    #[test]
    fn empty_failures_collapse_to_none() {
        assert!(DecodeFailures::new().into_option().is_none());
    }

    #[test]
    fn malformed_key_ring_names_count() {
        let err = KeyRingError::MalformedKeyRing { count: 2 };
        assert!(err.to_string().contains("2 key entities"));
    }
}
