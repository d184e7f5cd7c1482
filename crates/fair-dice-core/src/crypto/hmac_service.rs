//! Secure randomness and HMAC helpers backing each protocol round.

use super::commitment::{SecretCommitment, SecretKey, Tag};
use crate::config::{GameConfig, DEFAULT_KEY_BYTES};
use crate::error::GameError;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};

/// Fixed-width little-endian encoding of a committed integer.
///
/// The same encoding is used when computing and when verifying a tag.
pub fn int_to_bytes(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Uppercase hex encoding used for every displayed key and tag
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Recompute the tag for a disclosed key and value and compare
pub fn verify_tag(key: &SecretKey, value: i32, tag: &Tag) -> bool {
    tag.verify(key.as_bytes(), &int_to_bytes(value))
}

/// Generates keys and secrets from a cryptographically secure source and
/// computes HMAC-SHA256 tags over them.
///
/// The source defaults to the operating system RNG. Any `CryptoRng` can be
/// supplied, which lets tests replay a round from a seeded generator.
pub struct HmacService<R = OsRng> {
    rng: R,
    key_bytes: usize,
}

impl HmacService<OsRng> {
    /// Service backed by the OS RNG with the default key length
    pub fn new() -> Self {
        Self::with_rng(OsRng, DEFAULT_KEY_BYTES)
    }

    /// Service backed by the OS RNG using the configured key length
    pub fn from_config(config: &GameConfig) -> Self {
        Self::with_rng(OsRng, config.key_bytes)
    }
}

impl Default for HmacService<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> HmacService<R> {
    /// Service backed by the given RNG
    pub fn with_rng(rng: R, key_bytes: usize) -> Self {
        Self { rng, key_bytes }
    }

    /// Fresh random key of `byte_len` bytes
    pub fn generate_key(&mut self, byte_len: usize) -> SecretKey {
        let mut bytes = vec![0u8; byte_len];
        self.rng.fill_bytes(&mut bytes);
        SecretKey::from_bytes(bytes)
    }

    /// Uniform secret integer in `[min, max_inclusive]`
    pub fn generate_secret(&mut self, min: i32, max_inclusive: i32) -> Result<i32, GameError> {
        if min > max_inclusive {
            return Err(GameError::InvalidRange {
                min,
                max: max_inclusive,
            });
        }
        Ok(self.rng.gen_range(min..=max_inclusive))
    }

    /// HMAC tag of `message` under `key`
    pub fn compute_tag(&self, key: &SecretKey, message: &[u8]) -> Tag {
        Tag::compute(key.as_bytes(), message)
    }

    /// Draw a fresh key and secret in `[min, max]` and commit to them.
    ///
    /// Key first, then secret: replaying a seeded generator relies on this order.
    pub fn commit(&mut self, min: i32, max: i32) -> Result<SecretCommitment, GameError> {
        let key = self.generate_key(self.key_bytes);
        let secret = self.generate_secret(min, max)?;
        Ok(SecretCommitment::new(key, secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> HmacService<StdRng> {
        HmacService::with_rng(StdRng::seed_from_u64(seed), DEFAULT_KEY_BYTES)
    }

    #[test]
    fn test_generate_key_length() {
        let mut service = HmacService::new();
        assert_eq!(service.generate_key(32).as_bytes().len(), 32);
        assert_eq!(service.generate_key(64).as_bytes().len(), 64);
    }

    #[test]
    fn test_generate_key_is_fresh() {
        let mut service = HmacService::new();
        let key1 = service.generate_key(32);
        let key2 = service.generate_key(32);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_generate_secret_stays_in_range() {
        let mut service = seeded(1);
        for _ in 0..1000 {
            let value = service.generate_secret(0, 5).unwrap();
            assert!((0..=5).contains(&value));
        }
        assert_eq!(service.generate_secret(4, 4).unwrap(), 4);
        assert!((-3..=3).contains(&service.generate_secret(-3, 3).unwrap()));
    }

    #[test]
    fn test_generate_secret_covers_range() {
        let mut service = seeded(2);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[service.generate_secret(0, 5).unwrap() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_generate_secret_rejects_inverted_range() {
        let mut service = seeded(3);
        assert_eq!(
            service.generate_secret(5, 0),
            Err(GameError::InvalidRange { min: 5, max: 0 })
        );
    }

    #[test]
    fn test_int_to_bytes_fixed_width() {
        assert_eq!(int_to_bytes(1), [1, 0, 0, 0]);
        assert_eq!(int_to_bytes(256), [0, 1, 0, 0]);
        assert_eq!(int_to_bytes(-1), [0xFF; 4]);
    }

    #[test]
    fn test_to_hex_uppercase() {
        assert_eq!(to_hex(&[0x0a, 0xbc, 0xff]), "0ABCFF");
    }

    #[test]
    fn test_tag_recomputed_after_disclosure() {
        let mut service = seeded(4);
        let commitment = service.commit(0, 5).unwrap();
        let published = commitment.tag().to_string();

        // Counterpart recomputes from the disclosed key and value
        let key = SecretKey::from_hex(&commitment.key().to_hex()).unwrap();
        let recomputed = service.compute_tag(&key, &int_to_bytes(commitment.secret()));

        assert_eq!(recomputed.to_string(), published);
        assert!(verify_tag(&key, commitment.secret(), commitment.tag()));
    }

    #[test]
    fn test_commit_replays_from_same_seed() {
        let a = seeded(42).commit(0, 5).unwrap();
        let b = seeded(42).commit(0, 5).unwrap();

        assert_eq!(a.key(), b.key());
        assert_eq!(a.secret(), b.secret());
        assert_eq!(a.tag(), b.tag());
    }

    #[test]
    fn test_successive_commits_use_fresh_keys() {
        let mut service = HmacService::new();
        let first = service.commit(0, 1).unwrap();
        let second = service.commit(0, 1).unwrap();

        assert_ne!(first.key(), second.key());
        assert_ne!(first.tag(), second.tag());
    }
}
