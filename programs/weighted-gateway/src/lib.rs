//! Weighted-multisig gateway core.
//!
//! Authenticates requests against a rotating history of weighted operator
//! sets and executes signed command batches exactly once per command id.
//! All persisted data lives in a single [`state::GatewayState`] owned by a
//! [`Gateway`], which a host runtime can store with `borsh` between calls.
pub mod config;
pub mod error;
pub mod events;
pub mod processor;
pub mod proof;
pub mod signature;
pub mod state;

pub use gateway_encoding;

pub use crate::config::{GatewayConfig, OLD_KEY_RETENTION};
pub use crate::error::GatewayError;
pub use crate::processor::Gateway;
pub use crate::proof::ProofStatus;
pub use crate::signature::{Secp256k1Recovery, SignerRecovery};
