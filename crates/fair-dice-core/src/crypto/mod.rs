//! Cryptographic primitives for the commit-reveal protocol.
//!
//! This module provides:
//! - SecretKey and Tag (HMAC-SHA256) for commitments
//! - SecretCommitment holding one round's committed state
//! - HmacService for secure keys, secrets and tags

mod commitment;
mod hmac_service;

pub use commitment::{SecretCommitment, SecretKey, Tag};
pub use hmac_service::{int_to_bytes, to_hex, verify_tag, HmacService};
