//! Recovery of signer addresses from operator signatures.

use gateway_encoding::hasher::keccak256;
use gateway_encoding::Address;

/// Length of an Ethereum recoverable signature: `r || s || v`.
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Recovers the address that produced a signature over a 32-byte digest.
///
/// The proof validator only needs this capability, so it is injected rather
/// than hard-wired, which keeps the weight accounting testable with a fake.
pub trait SignerRecovery {
    /// Returns the signer of `signature` over `message_hash`, or `None` when
    /// no signer can be recovered.
    fn recover(&self, message_hash: &[u8; 32], signature: &[u8]) -> Option<Address>;
}

impl<F> SignerRecovery for F
where
    F: Fn(&[u8; 32], &[u8]) -> Option<Address>,
{
    fn recover(&self, message_hash: &[u8; 32], signature: &[u8]) -> Option<Address> {
        self(message_hash, signature)
    }
}

/// secp256k1 ECDSA recovery producing Ethereum addresses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover(&self, message_hash: &[u8; 32], signature: &[u8]) -> Option<Address> {
        let signature: &[u8; RECOVERABLE_SIGNATURE_LEN] = signature.try_into().ok()?;
        let [signature @ .., recovery_id] = signature;

        // Transform from Ethereum recovery_id (27, 28) to the range accepted by
        // secp256k1 recovery (0, 1, 2, 3)
        let recovery_id = if *recovery_id >= 27 {
            recovery_id.saturating_sub(27)
        } else {
            *recovery_id
        };

        let recovery_id = libsecp256k1::RecoveryId::parse(recovery_id).ok()?;
        let signature = libsecp256k1::Signature::parse_standard_slice(signature).ok()?;
        let message = libsecp256k1::Message::parse(message_hash);
        let public_key = libsecp256k1::recover(&message, &signature, &recovery_id).ok()?;

        Some(address_from_public_key(&public_key))
    }
}

/// Ethereum address of a secp256k1 public key: the last 20 bytes of the
/// keccak hash of its uncompressed form without the tag byte.
#[must_use]
pub fn address_from_public_key(public_key: &libsecp256k1::PublicKey) -> Address {
    let [_tag, uncompressed @ ..] = public_key.serialize();
    let hash = keccak256(uncompressed);
    Address::from_slice(&hash[12..])
}
