//! Gateway state processor.

use gateway_encoding::abi::WeightedOperators;
use gateway_encoding::{Address, B256};
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::events::{GatewayEvent, OperatorshipTransferredEvent};
use crate::signature::{Secp256k1Recovery, SignerRecovery};
use crate::state::{CommandId, Epoch, GatewayState, OperatorRegistry, OperatorsHash};

mod approve_contract_call;
mod call_contract;
mod execute;
mod transfer_operatorship;
mod validate_contract_call;
mod validate_proof;

/// A weighted-multisig gateway instance.
///
/// Owns the whole persisted [`GatewayState`]; every entry point borrows the
/// gateway mutably for the duration of a single call. Events emitted by the
/// entry points are buffered until [`Gateway::take_events`] drains them.
#[allow(clippy::multiple_inherent_impl)]
#[derive(Debug)]
pub struct Gateway<R = Secp256k1Recovery> {
    config: GatewayConfig,
    owner: Address,
    state: GatewayState,
    recovery: R,
    events: Vec<GatewayEvent>,
}

impl<R: SignerRecovery> Gateway<R> {
    /// Initialises a gateway with the encoded `recent_operator_sets`, oldest
    /// first. The last one becomes the current epoch.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::InvalidConfig`] if `config` does not validate.
    /// * [`GatewayError::InvalidOperators`] if no operator set is given or one
    ///   of them cannot be decoded.
    /// * Any registry error for the first invalid or duplicated set.
    pub fn new<P: AsRef<[u8]>>(
        config: GatewayConfig,
        owner: Address,
        recent_operator_sets: impl IntoIterator<Item = P>,
        recovery: R,
    ) -> Result<Self, GatewayError> {
        let operator_sets = recent_operator_sets
            .into_iter()
            .map(|params| decode_operators(params.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let registry = OperatorRegistry::new(&operator_sets)?;

        let mut gateway = Self::restore(config, owner, GatewayState::new(registry), recovery)?;
        for (epoch, operator_set) in (1..).zip(operator_sets) {
            let operators_hash = operator_set.hash();
            gateway.emit_operatorship_transferred(epoch, operators_hash, operator_set);
        }
        info!(
            chain_id = config.chain_id,
            current_epoch = gateway.current_epoch(),
            "gateway initialised"
        );
        Ok(gateway)
    }

    /// Rebuilds a gateway around previously persisted state.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidConfig`] if `config` does not validate.
    pub fn restore(
        config: GatewayConfig,
        owner: Address,
        state: GatewayState,
        recovery: R,
    ) -> Result<Self, GatewayError> {
        config.validate().map_err(|err| {
            warn!(%err, "rejected gateway configuration");
            GatewayError::InvalidConfig
        })?;
        Ok(Self {
            config,
            owner,
            state,
            recovery,
            events: Vec::new(),
        })
    }

    /// The configuration the gateway runs with.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The account allowed to rotate operators outside of a batch.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Read-only view of the persisted state.
    #[must_use]
    pub const fn state(&self) -> &GatewayState {
        &self.state
    }

    /// Consumes the gateway, handing back the state to persist.
    #[must_use]
    pub fn into_state(self) -> GatewayState {
        self.state
    }

    /// Drains the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GatewayEvent> {
        core::mem::take(&mut self.events)
    }

    /// Returns the current epoch.
    #[must_use]
    pub const fn current_epoch(&self) -> Epoch {
        self.state.registry.current_epoch()
    }

    /// Returns the operator set hash registered at `epoch`.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidOperators`] if no set was registered at `epoch`.
    pub fn hash_for_epoch(&self, epoch: Epoch) -> Result<OperatorsHash, GatewayError> {
        self.state.registry.hash_for_epoch(epoch)
    }

    /// Returns the epoch `operators_hash` was registered at.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidOperators`] if the hash is unknown.
    pub fn epoch_for_hash(&self, operators_hash: &OperatorsHash) -> Result<Epoch, GatewayError> {
        self.state.registry.epoch_for_hash(operators_hash)
    }

    /// Whether `command_id` was consumed by an earlier batch.
    #[must_use]
    pub fn is_command_executed(&self, command_id: &CommandId) -> bool {
        self.state.is_command_executed(command_id)
    }

    /// Rotates the registry to `operator_set` and emits the transfer event.
    fn rotate_operators(&mut self, operator_set: WeightedOperators) -> Result<Epoch, GatewayError> {
        let (epoch, operators_hash) = self.state.registry.rotate(&operator_set)?;
        self.emit_operatorship_transferred(epoch, operators_hash, operator_set);
        Ok(epoch)
    }

    fn emit_operatorship_transferred(
        &mut self,
        epoch: Epoch,
        operators_hash: OperatorsHash,
        operator_set: WeightedOperators,
    ) {
        let WeightedOperators {
            operators,
            weights,
            threshold,
        } = operator_set;
        self.emit(GatewayEvent::OperatorshipTransferred(
            OperatorshipTransferredEvent {
                epoch,
                operators_hash: B256::from(operators_hash),
                new_operators: operators,
                new_weights: weights,
                new_threshold: threshold,
            },
        ));
    }

    fn emit(&mut self, event: GatewayEvent) {
        debug!(event = %event.to_json(), "gateway event");
        self.events.push(event);
    }
}

fn decode_operators(params: &[u8]) -> Result<WeightedOperators, GatewayError> {
    WeightedOperators::decode(params).map_err(|_| GatewayError::InvalidOperators)
}
