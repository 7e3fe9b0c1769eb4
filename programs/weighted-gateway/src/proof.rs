//! Weighted-multisig proof validation.

use gateway_encoding::abi::{WeightedOperators, WeightedProof};
use gateway_encoding::{Address, Bytes, U256};

use crate::error::GatewayError;
use crate::signature::SignerRecovery;
use crate::state::{Epoch, OperatorRegistry};

/// Derived information about the operator set that signed a valid proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofStatus {
    /// The proof was signed by the operator set of the current epoch.
    Current,
    /// The proof was signed by a superseded operator set that is still inside
    /// the retention window.
    Recent,
}

impl ProofStatus {
    /// Whether the proof came from the current epoch.
    #[must_use]
    pub const fn is_current(self) -> bool {
        matches!(self, Self::Current)
    }
}

/// Validates an encoded [`WeightedProof`] over `message_hash`.
///
/// # Errors
///
/// * [`GatewayError::Encoding`] if `proof` cannot be decoded.
/// * [`GatewayError::InvalidOperators`] if the claimed operator set is unknown
///   or has left the retention window.
/// * [`GatewayError::MalformedSigners`] if a signature does not belong to the
///   remaining operators, or cannot be recovered.
/// * [`GatewayError::LowSignatureWeight`] if the signatures do not reach the
///   threshold.
pub fn validate_proof(
    registry: &OperatorRegistry,
    retention: u64,
    recovery: &impl SignerRecovery,
    message_hash: &[u8; 32],
    proof: &[u8],
) -> Result<ProofStatus, GatewayError> {
    let (operators, signatures) = WeightedProof::decode(proof)?.into_parts();

    let epoch = registry.epoch_for_hash(&operators.hash())?;
    registry.assert_valid_epoch(epoch, retention)?;

    validate_signatures(recovery, message_hash, &operators, &signatures)?;

    Ok(status_for_epoch(registry, epoch))
}

fn status_for_epoch(registry: &OperatorRegistry, epoch: Epoch) -> ProofStatus {
    if epoch == registry.current_epoch() {
        ProofStatus::Current
    } else {
        ProofStatus::Recent
    }
}

/// Matches signatures against the ascending operator list and accumulates
/// their weight until the threshold is met.
///
/// Operators without a signature are skipped. Signatures past the point where
/// the threshold is reached are never inspected.
fn validate_signatures(
    recovery: &impl SignerRecovery,
    message_hash: &[u8; 32],
    operator_set: &WeightedOperators,
    signatures: &[Bytes],
) -> Result<(), GatewayError> {
    let operators: &[Address] = &operator_set.operators;
    let mut operator_index = 0_usize;
    let mut total_weight = U256::ZERO;

    for signature in signatures {
        let signer = recovery
            .recover(message_hash, signature)
            .ok_or(GatewayError::MalformedSigners)?;

        let remaining = operators.get(operator_index..).unwrap_or_default();
        let offset = remaining
            .iter()
            .position(|operator| *operator == signer)
            .ok_or(GatewayError::MalformedSigners)?;
        operator_index += offset;

        let weight = operator_set
            .weights
            .get(operator_index)
            .ok_or(GatewayError::InvalidWeights)?;
        total_weight = total_weight.saturating_add(*weight);
        operator_index += 1;

        if total_weight >= operator_set.threshold {
            return Ok(());
        }
    }

    Err(GatewayError::LowSignatureWeight)
}
