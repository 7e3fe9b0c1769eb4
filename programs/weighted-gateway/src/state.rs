//! State owned by a gateway instance.

pub mod approvals;
pub mod operator_registry;

use std::collections::BTreeSet;

use borsh::{BorshDeserialize, BorshSerialize};

pub use approvals::{ContractCall, ContractCallApprovals};
pub use operator_registry::{Epoch, OperatorRegistry, OperatorsHash};

/// 32-byte identifier of a batch command.
pub type CommandId = [u8; 32];

/// Everything a gateway persists between calls.
///
/// The host runtime stores this value as a whole; every entry point reads and
/// mutates it only while the call is in flight.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct GatewayState {
    /// Epoch history of operator sets.
    pub registry: OperatorRegistry,
    /// Append-only set of command ids that were consumed by `execute`.
    pub executed_commands: BTreeSet<CommandId>,
    /// Outstanding contract-call approvals.
    pub approvals: ContractCallApprovals,
}

impl GatewayState {
    /// Create a new [`GatewayState`] around an initialised registry.
    #[must_use]
    pub fn new(registry: OperatorRegistry) -> Self {
        Self {
            registry,
            executed_commands: BTreeSet::new(),
            approvals: ContractCallApprovals::default(),
        }
    }

    /// Whether `command_id` was already consumed.
    #[must_use]
    pub fn is_command_executed(&self, command_id: &CommandId) -> bool {
        self.executed_commands.contains(command_id)
    }

    /// Marks `command_id` as consumed. Returns `false` if it already was.
    pub fn mark_command_executed(&mut self, command_id: CommandId) -> bool {
        self.executed_commands.insert(command_id)
    }
}
