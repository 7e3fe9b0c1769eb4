//! Error types

use gateway_encoding::EncodingError;

/// Errors of the weighted gateway.
///
/// Every variant aborts the call that raised it; no state is mutated before
/// the error is returned.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GatewayError {
    /// The operator set is empty, unsorted, contains duplicates or the zero
    /// address, is unknown to the registry, or belongs to an epoch outside
    /// the retention window.
    #[error("invalid operators")]
    InvalidOperators,

    /// The weights do not line up with the operators.
    #[error("invalid weights")]
    InvalidWeights,

    /// The threshold is zero or exceeds the total weight.
    #[error("invalid threshold")]
    InvalidThreshold,

    /// The operator set hash is already bound to an epoch.
    #[error("duplicate operators")]
    DuplicateOperators,

    /// The signatures did not accumulate enough weight.
    #[error("low signature weight")]
    LowSignatureWeight,

    /// A signature could not be matched against the remaining operators.
    #[error("malformed signers")]
    MalformedSigners,

    /// The command batch targets a different chain.
    #[error("invalid chain id")]
    InvalidChainId,

    /// The command batch could not be decoded or its sequences differ in
    /// length.
    #[error("invalid command batch")]
    InvalidCommandBatch,

    /// The gateway configuration is unusable.
    #[error("invalid gateway configuration")]
    InvalidConfig,

    /// The caller is not allowed to perform the operation.
    #[error("caller is not the gateway owner")]
    NotOwner,

    /// Epoch arithmetic over- or underflowed.
    #[error("epoch calculation overflow")]
    EpochCalculationOverflow,

    /// A wire payload did not match its schema.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
