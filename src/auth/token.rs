//! Opaque session tokens
//!
//! A session credential is 32 random bytes, hex-encoded, handed to the
//! client once. Only its SHA-256 digest is ever persisted, so a leaked
//! session table cannot be replayed.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Mint a fresh high-entropy token (64 hex chars, 256 bits).
pub fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// One-way digest of a presented token, the session store's lookup key.
pub fn hash_token(token: &str) -> String {
    to_hex(Sha256::digest(token.as_bytes()).as_slice())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
