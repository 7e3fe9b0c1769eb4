//! Builders for command batches and command parameters

use gateway_encoding::abi::{
    command_names, ApproveContractCallParams, CommandBatch, WeightedOperators,
};
use gateway_encoding::{Address, FixedBytes, U256};

/// Single command of a batch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// unique id of the command
    pub command_id: [u8; 32],
    /// selector the executor dispatches on
    pub name: String,
    /// encoded parameters
    pub params: Vec<u8>,
}

impl Command {
    /// Command with an arbitrary selector
    #[must_use]
    pub fn new(command_id: [u8; 32], name: &str, params: Vec<u8>) -> Self {
        Self {
            command_id,
            name: name.to_owned(),
            params,
        }
    }

    /// `approveContractCall` command
    #[must_use]
    pub fn approve_contract_call(command_id: [u8; 32], params: &ApproveContractCallParams) -> Self {
        Self::new(
            command_id,
            command_names::APPROVE_CONTRACT_CALL,
            params.encode(),
        )
    }

    /// `transferOperatorship` command
    #[must_use]
    pub fn transfer_operatorship(command_id: [u8; 32], operators: &WeightedOperators) -> Self {
        Self::new(
            command_id,
            command_names::TRANSFER_OPERATORSHIP,
            operators.encode(),
        )
    }
}

/// Encoded batch of `commands` for `chain_id`
#[must_use]
pub fn command_batch(chain_id: u64, commands: impl IntoIterator<Item = Command>) -> Vec<u8> {
    let mut batch = CommandBatch {
        chain_id: U256::from(chain_id),
        command_ids: Vec::new(),
        commands: Vec::new(),
        params: Vec::new(),
    };
    for command in commands {
        batch.command_ids.push(FixedBytes(command.command_id));
        batch.commands.push(command.name);
        batch.params.push(command.params.into());
    }
    batch.encode()
}

/// `approveContractCall` parameters with a random source transaction
#[must_use]
pub fn approve_contract_call_params(
    source_chain: &str,
    source_address: &str,
    contract_address: Address,
    payload_hash: [u8; 32],
) -> ApproveContractCallParams {
    ApproveContractCallParams {
        source_chain: source_chain.to_owned(),
        source_address: source_address.to_owned(),
        contract_address,
        payload_hash: FixedBytes(payload_hash),
        source_tx_hash: FixedBytes(libsecp_rand::random()),
        source_event_index: U256::from(libsecp_rand::random::<u32>()),
    }
}

/// Random 32-byte command id
#[must_use]
pub fn random_command_id() -> [u8; 32] {
    libsecp_rand::random()
}

/// Random non-zero address
#[must_use]
pub fn random_address() -> Address {
    let mut bytes: [u8; 20] = libsecp_rand::random();
    bytes[0] |= 1;
    Address::from(bytes)
}
