//! Wire format of the weighted gateway.
//!
//! # Overview
//!
//! Every structured argument accepted by the gateway (operator sets, proofs,
//! command batches and command parameters) is encoded with Ethereum's ABI
//! parameter encoding. This crate owns those schemas together with the
//! hashing primitives that the gateway derives identifiers from:
//!
//! - [`abi`] declares the schemas with `alloy-sol-types` and exposes strict
//!   decoders for them.
//! - [`hasher`] provides `keccak256` and the personal-sign digest that
//!   operators sign.

pub mod abi;
pub mod error;
pub mod hasher;

pub use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
pub use error::EncodingError;
