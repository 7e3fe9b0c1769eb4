//! Module for the `OperatorRegistry` type.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use gateway_encoding::abi::WeightedOperators;
use gateway_encoding::{Address, U256};

use crate::error::GatewayError;

/// Ever-incrementing counter for keeping track of the sequence of operator
/// sets
pub type Epoch = u64;
/// Operator set hash
pub type OperatorsHash = [u8; 32];

/// Append-only, bijective log of operator set hashes and the epochs they
/// were registered at.
///
/// Entries are never overwritten or removed; the retention window only limits
/// which of them may still sign proofs.
#[derive(BorshSerialize, BorshDeserialize, Clone, Default, PartialEq, Eq)]
pub struct OperatorRegistry {
    /// current epoch points to the latest operator set hash
    current_epoch: Epoch,
    hash_for_epoch: BTreeMap<Epoch, OperatorsHash>,
    epoch_for_hash: BTreeMap<OperatorsHash, Epoch>,
}

impl OperatorRegistry {
    /// Registers each operator set in order, producing epochs `1..=N`.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::InvalidOperators`] if `operator_sets` is empty.
    /// * Any error of [`Self::rotate`] for the first offending set.
    pub fn new<'a>(
        operator_sets: impl IntoIterator<Item = &'a WeightedOperators>,
    ) -> Result<Self, GatewayError> {
        let mut registry = Self::default();
        for operator_set in operator_sets {
            registry.rotate(operator_set)?;
        }
        if registry.current_epoch == 0 {
            return Err(GatewayError::InvalidOperators);
        }
        Ok(registry)
    }

    /// Checks the shape of an operator set.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::InvalidOperators`] if the operators are empty, not
    ///   strictly ascending, or include the zero address.
    /// * [`GatewayError::InvalidWeights`] if there is not exactly one weight
    ///   per operator, or the weights overflow 256 bits.
    /// * [`GatewayError::InvalidThreshold`] if the threshold is zero or above
    ///   the total weight.
    pub fn validate(operator_set: &WeightedOperators) -> Result<(), GatewayError> {
        let operators = &operator_set.operators;
        if !is_sorted_asc_without_duplicates(operators)
            || operators.first().map_or(true, |first| *first == Address::ZERO)
        {
            return Err(GatewayError::InvalidOperators);
        }

        if operator_set.weights.len() != operators.len() {
            return Err(GatewayError::InvalidWeights);
        }

        let total_weight = operator_set
            .weights
            .iter()
            .try_fold(U256::ZERO, |total, weight| total.checked_add(*weight))
            .ok_or(GatewayError::InvalidWeights)?;

        if operator_set.threshold.is_zero() || total_weight < operator_set.threshold {
            return Err(GatewayError::InvalidThreshold);
        }

        Ok(())
    }

    /// Validates `operator_set` and binds its hash to the next epoch.
    ///
    /// Returns the newly bound epoch together with the hash.
    ///
    /// # Errors
    ///
    /// * Any error of [`Self::validate`].
    /// * [`GatewayError::DuplicateOperators`] if the set was registered at any
    ///   earlier epoch.
    /// * [`GatewayError::EpochCalculationOverflow`] if the epoch counter is
    ///   exhausted.
    pub fn rotate(
        &mut self,
        operator_set: &WeightedOperators,
    ) -> Result<(Epoch, OperatorsHash), GatewayError> {
        Self::validate(operator_set)?;

        let operators_hash = operator_set.hash();
        if self.epoch_for_hash.contains_key(&operators_hash) {
            return Err(GatewayError::DuplicateOperators);
        }

        let epoch = self
            .current_epoch
            .checked_add(1)
            .ok_or(GatewayError::EpochCalculationOverflow)?;
        self.current_epoch = epoch;
        self.hash_for_epoch.insert(epoch, operators_hash);
        self.epoch_for_hash.insert(operators_hash, epoch);

        Ok((epoch, operators_hash))
    }

    /// Returns the current epoch.
    #[must_use]
    pub const fn current_epoch(&self) -> Epoch {
        self.current_epoch
    }

    /// Returns the operator set hash registered at `epoch`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidOperators`] if no set was registered at
    /// `epoch`.
    pub fn hash_for_epoch(&self, epoch: Epoch) -> Result<OperatorsHash, GatewayError> {
        self.hash_for_epoch
            .get(&epoch)
            .copied()
            .ok_or(GatewayError::InvalidOperators)
    }

    /// Returns the epoch `operators_hash` was registered at.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidOperators`] if the hash is unknown.
    pub fn epoch_for_hash(&self, operators_hash: &OperatorsHash) -> Result<Epoch, GatewayError> {
        self.epoch_for_hash
            .get(operators_hash)
            .copied()
            .ok_or(GatewayError::InvalidOperators)
    }

    /// Asserts that `epoch` is still inside the retention window.
    ///
    /// The epoch is considered valid if the difference between the current
    /// epoch and the given epoch is less than `retention`.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::EpochCalculationOverflow`] if `epoch` is ahead of the
    ///   current epoch.
    /// * [`GatewayError::InvalidOperators`] if the epoch is too old.
    pub fn assert_valid_epoch(&self, epoch: Epoch, retention: u64) -> Result<(), GatewayError> {
        let elapsed = self
            .current_epoch
            .checked_sub(epoch)
            .ok_or(GatewayError::EpochCalculationOverflow)?;

        if elapsed >= retention {
            return Err(GatewayError::InvalidOperators);
        }
        Ok(())
    }
}

impl core::fmt::Debug for OperatorRegistry {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_struct("OperatorRegistry")
            .field("current_epoch", &self.current_epoch)
            .field(
                "hash_for_epoch",
                &self
                    .hash_for_epoch
                    .iter()
                    .map(|(epoch, hash)| (epoch, hex::encode(hash)))
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

fn is_sorted_asc_without_duplicates(operators: &[Address]) -> bool {
    operators.windows(2).all(|pair| match pair {
        [lhs, rhs] => lhs < rhs,
        _ => false,
    })
}
