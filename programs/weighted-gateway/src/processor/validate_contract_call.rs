use gateway_encoding::{Address, B256};
use tracing::{debug, info};

use super::Gateway;
use crate::events::{ContractCallExecutedEvent, GatewayEvent};
use crate::signature::SignerRecovery;
use crate::state::{CommandId, ContractCall};

impl<R: SignerRecovery> Gateway<R> {
    /// Whether the described call is approved and not yet consumed.
    #[must_use]
    pub fn is_contract_call_approved(
        &self,
        command_id: CommandId,
        source_chain: &str,
        source_address: &str,
        contract_address: Address,
        payload_hash: [u8; 32],
    ) -> bool {
        self.state.approvals.is_approved(&ContractCall {
            command_id,
            source_chain,
            source_address,
            contract_address,
            payload_hash,
        })
    }

    /// Consumes the approval addressed to `caller`.
    ///
    /// A destination contract can only consume its own approvals, and every
    /// approval is consumed at most once. Returns whether an approval was
    /// consumed.
    pub fn validate_contract_call(
        &mut self,
        caller: Address,
        command_id: CommandId,
        source_chain: &str,
        source_address: &str,
        payload_hash: [u8; 32],
    ) -> bool {
        let call = ContractCall {
            command_id,
            source_chain,
            source_address,
            contract_address: caller,
            payload_hash,
        };
        if !self.state.approvals.consume(&call) {
            debug!(%caller, command_id = %hex::encode(command_id), "no approval to consume");
            return false;
        }

        info!(%caller, command_id = %hex::encode(command_id), "contract call approval consumed");
        self.emit(GatewayEvent::ContractCallExecuted(ContractCallExecutedEvent {
            command_id: B256::from(command_id),
            contract_address: caller,
            payload_hash: B256::from(payload_hash),
        }));
        true
    }
}
