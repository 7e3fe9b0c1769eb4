use gateway_encoding::abi::ApproveContractCallParams;
use gateway_encoding::{Address, B256};
use tracing::{info, warn};

use super::Gateway;
use crate::error::GatewayError;
use crate::events::{ContractCallApprovedEvent, GatewayEvent};
use crate::signature::SignerRecovery;
use crate::state::{CommandId, ContractCall};

impl<R: SignerRecovery> Gateway<R> {
    /// Approves an incoming contract call outside of a signed batch.
    ///
    /// `params` is the encoding of the `approveContractCall` command
    /// parameters. The command id is not recorded as executed.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::NotOwner`] if `caller` is not the owner.
    /// * [`GatewayError::Encoding`] if `params` cannot be decoded.
    pub fn approve_contract_call(
        &mut self,
        caller: Address,
        command_id: CommandId,
        params: &[u8],
    ) -> Result<bool, GatewayError> {
        if caller != self.owner {
            warn!(%caller, "contract call approval by non-owner");
            return Err(GatewayError::NotOwner);
        }

        let params = ApproveContractCallParams::decode(params)?;
        self.record_approval(command_id, params);
        Ok(true)
    }

    /// Stores the approval and emits [`ContractCallApprovedEvent`].
    pub(super) fn record_approval(&mut self, command_id: CommandId, params: ApproveContractCallParams) {
        self.state.approvals.approve(&ContractCall {
            command_id,
            source_chain: &params.source_chain,
            source_address: &params.source_address,
            contract_address: params.contract_address,
            payload_hash: params.payload_hash.0,
        });
        info!(
            command_id = %hex::encode(command_id),
            source_chain = %params.source_chain,
            contract_address = %params.contract_address,
            "contract call approved"
        );

        let ApproveContractCallParams {
            source_chain,
            source_address,
            contract_address,
            payload_hash,
            source_tx_hash,
            source_event_index,
        } = params;
        self.emit(GatewayEvent::ContractCallApproved(ContractCallApprovedEvent {
            command_id: B256::from(command_id),
            source_chain,
            source_address,
            contract_address,
            payload_hash,
            source_tx_hash,
            source_event_index,
        }));
    }
}
