use gateway_encoding::Address;
use tracing::{info, warn};

use super::{decode_operators, Gateway};
use crate::error::GatewayError;
use crate::signature::SignerRecovery;

impl<R: SignerRecovery> Gateway<R> {
    /// Registers the encoded operator set `params` as the next epoch.
    ///
    /// Only the gateway owner may rotate operators outside of a signed
    /// batch.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::NotOwner`] if `caller` is not the owner.
    /// * [`GatewayError::InvalidOperators`] if `params` cannot be decoded.
    /// * Any validation error of the operator set, or
    ///   [`GatewayError::DuplicateOperators`] if it was registered before.
    pub fn transfer_operatorship(
        &mut self,
        caller: Address,
        params: &[u8],
    ) -> Result<bool, GatewayError> {
        if caller != self.owner {
            warn!(%caller, "operatorship transfer by non-owner");
            return Err(GatewayError::NotOwner);
        }

        let operator_set = decode_operators(params)?;
        let epoch = self.rotate_operators(operator_set)?;
        info!(epoch, "operatorship transferred");
        Ok(true)
    }
}
