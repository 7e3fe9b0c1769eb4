//! Keccak hashing and the Ethereum personal-sign digest.

use sha3::{Digest, Keccak256};

/// Prefix prepended to a 32-byte hash before personal-sign hashing.
pub const PERSONAL_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the Keccak-256 hash of the input bytes.
#[must_use]
pub fn keccak256(bytes: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(bytes.as_ref()).into()
}

/// Hash `data` the way an Ethereum wallet does when asked to `signMessage`
/// over `keccak256(data)`:
///
/// `keccak256("\x19Ethereum Signed Message:\n32" || keccak256(data))`
#[must_use]
pub fn personal_sign_digest(data: impl AsRef<[u8]>) -> [u8; 32] {
    let data_hash = keccak256(data);
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_SIGN_PREFIX);
    hasher.update(data_hash);
    hasher.finalize().into()
}
