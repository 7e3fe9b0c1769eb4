use tracing::{debug, warn};

use super::Gateway;
use crate::error::GatewayError;
use crate::proof::{self, ProofStatus};
use crate::signature::SignerRecovery;

impl<R: SignerRecovery> Gateway<R> {
    /// Validates a weighted-multisig `proof` over `message_hash`.
    ///
    /// Returns `true` if the proof was signed by the current operator set and
    /// `false` if it was signed by a superseded set that is still retained.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate_proof_status`].
    pub fn validate_proof(&self, message_hash: &[u8; 32], proof: &[u8]) -> Result<bool, GatewayError> {
        self.validate_proof_status(message_hash, proof)
            .map(ProofStatus::is_current)
    }

    /// Validates a weighted-multisig `proof` over `message_hash`, reporting
    /// whether the signing set is the current one.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::Encoding`] if the proof cannot be decoded.
    /// * [`GatewayError::InvalidOperators`] if the signing set is unknown or
    ///   outside the retention window.
    /// * [`GatewayError::MalformedSigners`] if the signatures do not match the
    ///   ascending operator list.
    /// * [`GatewayError::LowSignatureWeight`] if the threshold is not met.
    pub fn validate_proof_status(
        &self,
        message_hash: &[u8; 32],
        proof: &[u8],
    ) -> Result<ProofStatus, GatewayError> {
        let status = proof::validate_proof(
            &self.state.registry,
            self.config.previous_operators_retention,
            &self.recovery,
            message_hash,
            proof,
        );
        match &status {
            Ok(status) => debug!(?status, message_hash = %hex::encode(message_hash), "proof accepted"),
            Err(err) => warn!(%err, message_hash = %hex::encode(message_hash), "proof rejected"),
        }
        status
    }
}
