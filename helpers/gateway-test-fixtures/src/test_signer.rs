//! Operator sets that can sign over messages

use gateway_encoding::abi::{ExecuteInput, WeightedOperators, WeightedProof};
use gateway_encoding::hasher::{keccak256, personal_sign_digest};
use gateway_encoding::{Address, Bytes, U256};

/// Single test signer
#[derive(Clone)]
pub struct TestSigner {
    /// private key
    pub secret_key: libsecp256k1::SecretKey,
    /// Ethereum address of the key
    pub address: Address,
}

impl TestSigner {
    /// New signer with a random key
    #[must_use]
    pub fn random() -> Self {
        let secret_key = libsecp256k1::SecretKey::random(&mut libsecp_rand::rngs::OsRng);
        let public_key = libsecp256k1::PublicKey::from_secret_key(&secret_key);
        let [_tag, uncompressed @ ..] = public_key.serialize();
        let address = Address::from_slice(&keccak256(uncompressed)[12..]);
        Self {
            secret_key,
            address,
        }
    }

    /// Signs a 32-byte digest, producing an Ethereum style `r || s || v`
    /// signature with `v` in `{27, 28}`.
    #[must_use]
    pub fn sign(&self, digest: &[u8; 32]) -> Bytes {
        let message = libsecp256k1::Message::parse(digest);
        let (signature, recovery_id) = libsecp256k1::sign(&message, &self.secret_key);
        let mut signature_bytes = signature.serialize().to_vec();
        signature_bytes.push(recovery_id.serialize() + 27);
        signature_bytes.into()
    }
}

#[allow(clippy::min_ident_chars)]
impl core::fmt::Debug for TestSigner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Create `count` random signers, sorted by address
#[must_use]
pub fn create_signers(count: usize) -> Vec<TestSigner> {
    let mut signers = (0..count).map(|_| TestSigner::random()).collect::<Vec<_>>();
    signers.sort_by_key(|signer| signer.address);
    signers
}

/// Utility operator set representation that has access to the signing keys
#[derive(Clone, Debug)]
pub struct SigningOperatorSet {
    /// signers, ascending by address
    pub signers: Vec<TestSigner>,
    /// weight of each signer
    pub weights: Vec<U256>,
    /// weight required for a proof
    pub threshold: U256,
}

impl SigningOperatorSet {
    /// `count` fresh signers with weight 1 each
    #[must_use]
    pub fn new(count: usize, threshold: u64) -> Self {
        Self::with_weights(create_signers(count), vec![1; count], threshold)
    }

    /// Operator set over existing `signers` with custom weights
    ///
    /// # Panics
    /// if the signers are not sorted, or the weights don't line up
    #[must_use]
    pub fn with_weights(signers: Vec<TestSigner>, weights: Vec<u64>, threshold: u64) -> Self {
        assert!(
            signers.windows(2).all(|pair| pair[0].address < pair[1].address),
            "signers must be sorted"
        );
        assert_eq!(signers.len(), weights.len(), "one weight per signer");
        Self {
            signers,
            weights: weights.into_iter().map(U256::from).collect(),
            threshold: U256::from(threshold),
        }
    }

    /// The operator set the gateway registers
    #[must_use]
    pub fn operators(&self) -> WeightedOperators {
        WeightedOperators::new(
            self.signers.iter().map(|signer| signer.address).collect(),
            self.weights.clone(),
            self.threshold,
        )
    }

    /// Encoded operator set, as passed to the gateway
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.operators().encode()
    }

    /// Registry hash of the operator set
    #[must_use]
    pub fn hash(&self) -> [u8; 32] {
        self.operators().hash()
    }

    /// Proof over `message_hash` signed by the signers at `indices`, in the
    /// order given
    #[must_use]
    pub fn proof(&self, message_hash: &[u8; 32], indices: &[usize]) -> Vec<u8> {
        let signers = indices.iter().map(|index| &self.signers[*index]);
        self.proof_by(message_hash, signers)
    }

    /// Proof over `message_hash` with signatures from arbitrary signers, in
    /// the order given
    #[must_use]
    pub fn proof_by<'a>(
        &self,
        message_hash: &[u8; 32],
        signers: impl IntoIterator<Item = &'a TestSigner>,
    ) -> Vec<u8> {
        let WeightedOperators {
            operators,
            weights,
            threshold,
        } = self.operators();
        WeightedProof {
            operators,
            weights,
            threshold,
            signatures: signers
                .into_iter()
                .map(|signer| signer.sign(message_hash))
                .collect(),
        }
        .encode()
    }

    /// `execute` input for `data`, signed by the signers at `indices`
    #[must_use]
    pub fn execute_input(&self, data: &[u8], indices: &[usize]) -> Vec<u8> {
        let proof = self.proof(&personal_sign_digest(data), indices);
        ExecuteInput {
            data: Bytes::copy_from_slice(data),
            proof: proof.into(),
        }
        .encode()
    }
}
