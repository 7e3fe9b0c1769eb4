//! ABI schemas for every structured argument that crosses the gateway
//! boundary.
//!
//! All payloads use Ethereum's parameter encoding (the layout produced by
//! `ethers.utils.defaultAbiCoder.encode(types, values)`), so signers and
//! relayers built against the EVM gateway interoperate bit for bit. Decoding
//! always runs in validating mode: a payload that does not re-encode to the
//! exact same bytes is rejected instead of being coerced.

use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use alloy_sol_types::{sol, SolValue};

use crate::error::EncodingError;
use crate::hasher::keccak256;

sol! {
    /// A weighted operator set as registered by a rotation.
    ///
    /// Wire form: `(address[], uint256[], uint256)`.
    #[derive(Debug, PartialEq, Eq)]
    struct WeightedOperators {
        address[] operators;
        uint256[] weights;
        uint256 threshold;
    }

    /// The claimed operator set together with the signatures presented
    /// against it.
    ///
    /// Wire form: `(address[], uint256[], uint256, bytes[])`.
    #[derive(Debug, PartialEq, Eq)]
    struct WeightedProof {
        address[] operators;
        uint256[] weights;
        uint256 threshold;
        bytes[] signatures;
    }

    /// Outer envelope of an `execute` call.
    ///
    /// Wire form: `(bytes, bytes)`.
    #[derive(Debug, PartialEq, Eq)]
    struct ExecuteInput {
        bytes data;
        bytes proof;
    }

    /// A signed batch of commands.
    ///
    /// Wire form: `(uint256, bytes32[], string[], bytes[])`.
    #[derive(Debug, PartialEq, Eq)]
    struct CommandBatch {
        uint256 chain_id;
        bytes32[] command_ids;
        string[] commands;
        bytes[] params;
    }

    /// Parameters of the `approveContractCall` command.
    ///
    /// Wire form: `(string, string, address, bytes32, bytes32, uint256)`.
    #[derive(Debug, PartialEq, Eq)]
    struct ApproveContractCallParams {
        string source_chain;
        string source_address;
        address contract_address;
        bytes32 payload_hash;
        bytes32 source_tx_hash;
        uint256 source_event_index;
    }

    /// Preimage of a contract-call approval storage key.
    #[derive(Debug, PartialEq, Eq)]
    struct ContractCallApprovalKey {
        bytes prefix;
        bytes32 command_id;
        string source_chain;
        string source_address;
        address contract_address;
        bytes32 payload_hash;
    }
}

/// Command selectors understood by the gateway executor.
pub mod command_names {
    /// Approves an incoming cross-chain contract call.
    pub const APPROVE_CONTRACT_CALL: &str = "approveContractCall";
    /// Rotates the operator set to a new epoch.
    pub const TRANSFER_OPERATORSHIP: &str = "transferOperatorship";
}

/// Domain prefix mixed into every contract-call approval key.
#[must_use]
pub fn contract_call_approved_prefix() -> [u8; 32] {
    keccak256(b"contract-call-approved")
}

impl WeightedOperators {
    /// Construct an operator set from its parts.
    #[must_use]
    pub fn new(operators: Vec<Address>, weights: Vec<U256>, threshold: U256) -> Self {
        Self {
            operators,
            weights,
            threshold,
        }
    }

    /// Decode an operator set from its parameter encoding.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Abi`] if `data` is not a canonical
    /// `(address[], uint256[], uint256)` encoding.
    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        Self::abi_decode_params(data, true).map_err(|source| EncodingError::Abi {
            schema: "WeightedOperators",
            source,
        })
    }

    /// Parameter encoding of the operator set.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }

    /// The registry hash of this operator set: `keccak256` over its
    /// parameter encoding.
    #[must_use]
    pub fn hash(&self) -> [u8; 32] {
        keccak256(self.encode())
    }
}

impl WeightedProof {
    /// Decode a proof from its parameter encoding.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Abi`] if `data` is not a canonical
    /// `(address[], uint256[], uint256, bytes[])` encoding.
    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        Self::abi_decode_params(data, true).map_err(|source| EncodingError::Abi {
            schema: "WeightedProof",
            source,
        })
    }

    /// Parameter encoding of the proof.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }

    /// Split the proof into the operator set it claims and its signatures.
    #[must_use]
    pub fn into_parts(self) -> (WeightedOperators, Vec<Bytes>) {
        let Self {
            operators,
            weights,
            threshold,
            signatures,
        } = self;
        (
            WeightedOperators::new(operators, weights, threshold),
            signatures,
        )
    }
}

impl ExecuteInput {
    /// Decode the `(data, proof)` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Abi`] if `input` is not a canonical
    /// `(bytes, bytes)` encoding.
    pub fn decode(input: &[u8]) -> Result<Self, EncodingError> {
        Self::abi_decode_params(input, true).map_err(|source| EncodingError::Abi {
            schema: "ExecuteInput",
            source,
        })
    }

    /// Parameter encoding of the envelope.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }
}

impl CommandBatch {
    /// Decode a command batch.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Abi`] if `data` is not a canonical
    /// `(uint256, bytes32[], string[], bytes[])` encoding.
    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        Self::abi_decode_params(data, true).map_err(|source| EncodingError::Abi {
            schema: "CommandBatch",
            source,
        })
    }

    /// Parameter encoding of the batch.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }

    /// Whether the three parallel sequences have the same length.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.command_ids.len() == self.commands.len() && self.commands.len() == self.params.len()
    }
}

impl ApproveContractCallParams {
    /// Decode `approveContractCall` parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Abi`] if `data` is not a canonical
    /// `(string, string, address, bytes32, bytes32, uint256)` encoding.
    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        Self::abi_decode_params(data, true).map_err(|source| EncodingError::Abi {
            schema: "ApproveContractCallParams",
            source,
        })
    }

    /// Parameter encoding of the command parameters.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }
}

impl ContractCallApprovalKey {
    /// Build the key preimage for an approval addressed to `contract_address`.
    #[must_use]
    pub fn new(
        command_id: [u8; 32],
        source_chain: &str,
        source_address: &str,
        contract_address: Address,
        payload_hash: [u8; 32],
    ) -> Self {
        Self {
            prefix: contract_call_approved_prefix().to_vec().into(),
            command_id: FixedBytes(command_id),
            source_chain: source_chain.to_owned(),
            source_address: source_address.to_owned(),
            contract_address,
            payload_hash: FixedBytes(payload_hash),
        }
    }

    /// Storage slot of the approval.
    #[must_use]
    pub fn hash(&self) -> [u8; 32] {
        keccak256(self.abi_encode_params())
    }
}
