//! Test utilities for the weighted gateway
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::indexing_slicing)]

pub mod payload;
pub mod test_signer;

pub use payload::{
    approve_contract_call_params, command_batch, random_address, random_command_id, Command,
};
pub use test_signer::{create_signers, SigningOperatorSet, TestSigner};
