//! Secret key, HMAC tag and the per-round commitment for the commit-reveal scheme.

use crate::error::GameError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Per-round HMAC key, disclosed only once the counterpart has answered
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(#[serde(with = "hex_upper")] Vec<u8>);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string (either case)
    pub fn from_hex(s: &str) -> Result<Self, GameError> {
        hex::decode(s.trim())
            .map(Self)
            .map_err(|e| GameError::InvalidHex(e.to_string()))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Uppercase hex form shown on disclosure
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({} bytes)", self.0.len())
    }
}

/// Tag = HMAC-SHA256(key, message)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag(#[serde(with = "hex_upper")] [u8; 32]);

impl Tag {
    /// Compute the tag of `message` under `key`
    pub fn compute(key: &[u8], message: &[u8]) -> Self {
        let mut mac = mac_for(key);
        mac.update(message);
        Self(mac.finalize().into_bytes().into())
    }

    /// Parse from a 64 character hex string (either case)
    pub fn from_hex(s: &str) -> Result<Self, GameError> {
        let bytes = hex::decode(s.trim()).map_err(|e| GameError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| GameError::InvalidHex("expected 32 bytes".to_string()))?;
        Ok(Self(bytes))
    }

    /// Verify that `key` and `message` produce this tag
    pub fn verify(&self, key: &[u8], message: &[u8]) -> bool {
        let mut mac = mac_for(key);
        mac.update(message);
        mac.verify_slice(&self.0).is_ok()
    }
}

fn mac_for(key: &[u8]) -> HmacSha256 {
    // HMAC accepts any key length
    HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length")
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", hex::encode_upper(&self.0[..8]))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

/// Committed state of one round: key, secret value and the published tag.
///
/// Only the tag may be shown before the counterpart answers.
pub struct SecretCommitment {
    key: SecretKey,
    secret: i32,
    tag: Tag,
}

impl SecretCommitment {
    pub(crate) fn new(key: SecretKey, secret: i32) -> Self {
        let tag = Tag::compute(key.as_bytes(), &super::int_to_bytes(secret));
        Self { key, secret, tag }
    }

    /// The tag to publish
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The committed value
    pub fn secret(&self) -> i32 {
        self.secret
    }

    /// The round key
    pub fn key(&self) -> &SecretKey {
        &self.key
    }
}

impl fmt::Debug for SecretCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCommitment")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

mod hex_upper {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, T: AsRef<[u8]>>(bytes: &T, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode_upper(bytes))
    }

    pub fn deserialize<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<Vec<u8>>,
    {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        T::try_from(bytes).map_err(|_| serde::de::Error::custom("unexpected byte length"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::int_to_bytes;

    #[test]
    fn test_tag_verification() {
        let key = [7u8; 32];
        let tag = Tag::compute(&key, &int_to_bytes(3));

        assert!(tag.verify(&key, &int_to_bytes(3)));
    }

    #[test]
    fn test_different_values_different_tags() {
        let key = [7u8; 32];

        assert_ne!(
            Tag::compute(&key, &int_to_bytes(0)),
            Tag::compute(&key, &int_to_bytes(1))
        );
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let tag = Tag::compute(&[1u8; 32], &int_to_bytes(4));

        assert!(!tag.verify(&[2u8; 32], &int_to_bytes(4)));
    }

    #[test]
    fn test_wrong_value_fails_verification() {
        let key = [9u8; 32];
        let tag = Tag::compute(&key, &int_to_bytes(4));

        assert!(!tag.verify(&key, &int_to_bytes(5)));
    }

    #[test]
    fn test_known_hmac_sha256_vector() {
        // RFC 4231 test case 2
        let tag = Tag::compute(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            tag.to_string(),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }

    #[test]
    fn test_tag_hex_roundtrip() {
        let tag = Tag::compute(&[3u8; 32], &int_to_bytes(1));
        let parsed = Tag::from_hex(&tag.to_string().to_lowercase()).unwrap();

        assert_eq!(parsed, tag);
        assert!(Tag::from_hex("ABCD").is_err());
        assert!(Tag::from_hex("not hex").is_err());
    }

    #[test]
    fn test_secret_key_debug_hides_bytes() {
        let key = SecretKey::from_bytes(vec![0xAB; 32]);
        let debug = format!("{:?}", key);

        assert_eq!(debug, "SecretKey(32 bytes)");
        assert!(!debug.contains("AB"));
    }

    #[test]
    fn test_commitment_debug_hides_secret() {
        let commitment = SecretCommitment::new(SecretKey::from_bytes(vec![1; 32]), 5);
        let debug = format!("{:?}", commitment);

        assert!(debug.contains("tag"));
        assert!(!debug.contains("secret:"));
        assert!(!debug.contains("key:"));
    }
}
