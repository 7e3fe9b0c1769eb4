//! Errors raised while moving data across the wire format.

/// Errors that can happen while decoding ABI payloads.
#[derive(thiserror::Error, Debug)]
pub enum EncodingError {
    /// The payload did not match the expected ABI schema.
    #[error("abi decoding failed for `{schema}`: {source}")]
    Abi {
        /// The schema the payload was decoded against.
        schema: &'static str,
        /// The underlying decoder error.
        #[source]
        source: alloy_sol_types::Error,
    },
}

impl PartialEq for EncodingError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Abi { schema: lhs, .. }, Self::Abi { schema: rhs, .. }) => lhs == rhs,
        }
    }
}

impl Eq for EncodingError {}
