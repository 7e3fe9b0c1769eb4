//! One-time approvals of incoming contract calls.

use std::collections::BTreeSet;

use borsh::{BorshDeserialize, BorshSerialize};
use gateway_encoding::abi::ContractCallApprovalKey;
use gateway_encoding::Address;

use super::CommandId;

/// Identifies a single approved contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractCall<'a> {
    /// The command that carried the approval.
    pub command_id: CommandId,
    /// The chain the call originates from.
    pub source_chain: &'a str,
    /// The address on the source chain that made the call.
    pub source_address: &'a str,
    /// The only contract allowed to consume the approval.
    pub contract_address: Address,
    /// Hash of the call payload.
    pub payload_hash: [u8; 32],
}

impl ContractCall<'_> {
    /// Storage key of the approval.
    #[must_use]
    pub fn key(&self) -> [u8; 32] {
        ContractCallApprovalKey::new(
            self.command_id,
            self.source_chain,
            self.source_address,
            self.contract_address,
            self.payload_hash,
        )
        .hash()
    }
}

/// Set of outstanding contract-call approvals, stored by key hash.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractCallApprovals {
    approved: BTreeSet<[u8; 32]>,
}

impl ContractCallApprovals {
    /// Marks `call` as approved. Approving the same call twice is a no-op.
    pub fn approve(&mut self, call: &ContractCall<'_>) {
        self.approved.insert(call.key());
    }

    /// Whether `call` is approved and not yet consumed.
    #[must_use]
    pub fn is_approved(&self, call: &ContractCall<'_>) -> bool {
        self.approved.contains(&call.key())
    }

    /// Consumes the approval of `call`.
    ///
    /// Returns `true` exactly once per approval.
    pub fn consume(&mut self, call: &ContractCall<'_>) -> bool {
        self.approved.remove(&call.key())
    }

    /// Number of outstanding approvals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.approved.len()
    }

    /// Whether there are no outstanding approvals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}
