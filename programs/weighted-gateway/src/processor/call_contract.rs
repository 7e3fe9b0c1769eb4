use gateway_encoding::hasher::keccak256;
use gateway_encoding::{Address, Bytes, B256};
use tracing::info;

use super::Gateway;
use crate::events::{ContractCallEvent, GatewayEvent};
use crate::signature::SignerRecovery;

impl<R: SignerRecovery> Gateway<R> {
    /// Initiates an outbound cross-chain call by emitting a
    /// [`ContractCallEvent`] for relayers to pick up.
    ///
    /// Nothing is persisted. The emitted event is also returned.
    pub fn call_contract(
        &mut self,
        caller: Address,
        destination_chain: &str,
        destination_contract_address: &str,
        payload: &[u8],
    ) -> ContractCallEvent {
        let payload_hash = B256::from(keccak256(payload));
        info!(
            %caller,
            destination_chain,
            destination_contract_address,
            %payload_hash,
            "contract call"
        );

        let event = ContractCallEvent {
            address: caller,
            destination_chain: destination_chain.to_owned(),
            destination_contract_address: destination_contract_address.to_owned(),
            payload_hash,
            payload: Bytes::copy_from_slice(payload),
        };
        self.emit(GatewayEvent::ContractCall(event.clone()));
        event
    }
}
