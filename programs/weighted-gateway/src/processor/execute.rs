use gateway_encoding::abi::{command_names, ApproveContractCallParams, CommandBatch, ExecuteInput};
use gateway_encoding::hasher::personal_sign_digest;
use gateway_encoding::{B256, U256};
use tracing::{debug, info, warn};

use super::{decode_operators, Gateway};
use crate::error::GatewayError;
use crate::events::{ExecutedEvent, GatewayEvent};
use crate::signature::SignerRecovery;
use crate::state::CommandId;

impl<R: SignerRecovery> Gateway<R> {
    /// Executes a signed command batch.
    ///
    /// `input` is the encoding of `(bytes data, bytes proof)`; the proof must
    /// sign the personal-sign digest of `data`. Returns one result per
    /// command, in batch order.
    ///
    /// Commands that were executed before, carry an unknown name, or ask for
    /// an operator rotation that is not allowed under this proof yield
    /// `false` and stay unconsumed. A command whose handler fails yields
    /// `false` but stays consumed, and the rest of the batch still runs.
    ///
    /// # Errors
    ///
    /// Nothing is mutated when an error is returned.
    ///
    /// * [`GatewayError::Encoding`] if `input` or the proof cannot be decoded.
    /// * Any error of [`Self::validate_proof_status`].
    /// * [`GatewayError::InvalidCommandBatch`] if `data` is not a well-formed
    ///   batch.
    /// * [`GatewayError::InvalidChainId`] if the batch targets another chain.
    pub fn execute(&mut self, input: &[u8]) -> Result<Vec<bool>, GatewayError> {
        let ExecuteInput { data, proof } = ExecuteInput::decode(input)?;

        let message_hash = personal_sign_digest(&data);
        let proof_status = self.validate_proof_status(&message_hash, &proof)?;

        let batch = CommandBatch::decode(&data).map_err(|err| {
            warn!(%err, "undecodable command batch");
            GatewayError::InvalidCommandBatch
        })?;
        if !batch.is_well_formed() {
            return Err(GatewayError::InvalidCommandBatch);
        }
        if batch.chain_id != U256::from(self.config.chain_id) {
            warn!(chain_id = %batch.chain_id, expected = self.config.chain_id, "batch for another chain");
            return Err(GatewayError::InvalidChainId);
        }

        // operators may only be rotated once per batch, and only by the
        // current operator set
        let mut allow_operatorship_transfer = proof_status.is_current();

        let CommandBatch {
            command_ids,
            commands,
            params,
            ..
        } = batch;
        let mut results = Vec::with_capacity(command_ids.len());
        for ((command_id, command), params) in command_ids.into_iter().zip(commands).zip(params) {
            let success = self.execute_command(
                command_id.0,
                &command,
                &params,
                &mut allow_operatorship_transfer,
            );
            results.push(success);
        }

        info!(
            commands = results.len(),
            succeeded = results.iter().filter(|success| **success).count(),
            "batch executed"
        );
        Ok(results)
    }

    fn execute_command(
        &mut self,
        command_id: CommandId,
        command: &str,
        params: &[u8],
        allow_operatorship_transfer: &mut bool,
    ) -> bool {
        if self.state.is_command_executed(&command_id) {
            debug!(command_id = %hex::encode(command_id), "command already executed");
            return false;
        }

        let success = match command {
            command_names::APPROVE_CONTRACT_CALL => {
                self.state.mark_command_executed(command_id);
                self.approve_contract_call_command(command_id, params)
            }
            command_names::TRANSFER_OPERATORSHIP => {
                if !*allow_operatorship_transfer {
                    debug!(command_id = %hex::encode(command_id), "operatorship transfer not allowed");
                    return false;
                }
                *allow_operatorship_transfer = false;
                self.state.mark_command_executed(command_id);
                self.transfer_operatorship_command(params)
            }
            unknown => {
                debug!(command_id = %hex::encode(command_id), command = unknown, "unknown command");
                return false;
            }
        };

        if success {
            self.emit(GatewayEvent::Executed(ExecutedEvent {
                command_id: B256::from(command_id),
            }));
        } else {
            warn!(command_id = %hex::encode(command_id), command, "command failed");
        }
        success
    }

    fn transfer_operatorship_command(&mut self, params: &[u8]) -> bool {
        let rotated = decode_operators(params).and_then(|operator_set| self.rotate_operators(operator_set));
        match rotated {
            Ok(epoch) => {
                info!(epoch, "operatorship transferred");
                true
            }
            Err(err) => {
                warn!(%err, "operatorship transfer rejected");
                false
            }
        }
    }

    fn approve_contract_call_command(&mut self, command_id: CommandId, params: &[u8]) -> bool {
        match ApproveContractCallParams::decode(params) {
            Ok(params) => {
                self.record_approval(command_id, params);
                true
            }
            Err(err) => {
                warn!(%err, "undecodable contract call approval");
                false
            }
        }
    }
}
