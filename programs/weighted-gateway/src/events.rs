//! Events emitted by the weighted gateway.

use gateway_encoding::{Address, Bytes, B256, U256};
use serde::Serialize;

/// Event emitted when a contract call is initiated.
/// This event is emitted during `call_contract` and is what relayers pick up
/// for cross-chain delivery.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractCallEvent {
    /// The caller that initiated the contract call
    pub address: Address,
    /// The destination chain identifier
    pub destination_chain: String,
    /// The destination contract address
    pub destination_contract_address: String,
    /// Hash of the payload being sent
    pub payload_hash: B256,
    /// The raw payload data
    pub payload: Bytes,
}

/// Event emitted when an `approveContractCall` command is executed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractCallApprovedEvent {
    /// The command id that carried the approval
    pub command_id: B256,
    /// The source chain identifier
    pub source_chain: String,
    /// The source address that sent the call
    pub source_address: String,
    /// The contract allowed to consume the approval
    pub contract_address: Address,
    /// Hash of the payload
    pub payload_hash: B256,
    /// Hash of the transaction on the source chain
    pub source_tx_hash: B256,
    /// Index of the event in the source transaction
    pub source_event_index: U256,
}

/// Event emitted when a destination contract consumes its approval.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractCallExecutedEvent {
    /// The command id of the consumed approval
    pub command_id: B256,
    /// The contract that consumed the approval
    pub contract_address: Address,
    /// Hash of the payload
    pub payload_hash: B256,
}

/// Event emitted when the operator set is rotated.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OperatorshipTransferredEvent {
    /// The epoch the new operator set is bound to
    pub epoch: u64,
    /// Hash of the new operator set
    pub operators_hash: B256,
    /// The new operators
    pub new_operators: Vec<Address>,
    /// The new operator weights
    pub new_weights: Vec<U256>,
    /// The new threshold
    pub new_threshold: U256,
}

/// Event emitted for every command of a batch that executed successfully.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutedEvent {
    /// The executed command id
    pub command_id: B256,
}

/// Represents the various events emitted by the gateway.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GatewayEvent {
    /// An outbound contract call.
    ContractCall(ContractCallEvent),
    /// An incoming contract call was approved.
    ContractCallApproved(ContractCallApprovedEvent),
    /// An approval was consumed by its destination contract.
    ContractCallExecuted(ContractCallExecutedEvent),
    /// The operator set was rotated.
    OperatorshipTransferred(OperatorshipTransferredEvent),
    /// A batch command executed.
    Executed(ExecutedEvent),
}

impl GatewayEvent {
    /// JSON rendering used in the event log line.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
    }
}
