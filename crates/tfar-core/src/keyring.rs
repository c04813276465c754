//! # Key Ring Parser
//!
//! Turns an ASCII-armored OpenPGP public key file into the single signing
//! key a provider build is published with.
//!
//! The armor text is returned exactly as received. Clients verify the
//! checksum signature against these bytes, so it is never re-serialized.

use std::io::Cursor;

use pgp::composed::{Deserializable, SignedPublicKey};
use pgp::types::KeyTrait;
use serde::{Deserialize, Serialize};

use crate::error::KeyRingError;

/// A provider signing key: primary key id plus the original armor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    /// Primary key id as 16 uppercase hex digits.
    pub key_id: String,
    /// The armored key file, byte-for-byte.
    pub ascii_armor: String,
}

impl SigningKey {
    /// Parse an armored key ring that must hold exactly one key entity.
    ///
    /// Input that fails to decode is reported as a ring with zero entities.
    pub fn from_armored(armored: &[u8]) -> Result<Self, KeyRingError> {
        let keys = read_key_ring(armored);
        let [key] = keys.as_slice() else {
            return Err(KeyRingError::MalformedKeyRing { count: keys.len() });
        };

        let ascii_armor = std::str::from_utf8(armored)
            .map_err(|_| KeyRingError::NotUtf8)?
            .to_string();

        Ok(Self {
            key_id: hex::encode_upper(key.key_id()),
            ascii_armor,
        })
    }
}

fn read_key_ring(armored: &[u8]) -> Vec<SignedPublicKey> {
    let iter = match SignedPublicKey::from_armor_many(Cursor::new(armored)) {
        Ok((iter, _headers)) => iter,
        Err(err) => {
            tracing::debug!(error = %err, "key ring armor did not decode");
            return Vec::new();
        }
    };

    let mut keys = Vec::new();
    for key in iter {
        match key {
            Ok(key) => keys.push(key),
            Err(err) => {
                tracing::debug!(error = %err, "key ring packet did not decode");
                return Vec::new();
            }
        }
    }
    keys
}
