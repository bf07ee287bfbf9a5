use async_trait::async_trait;
use common::Address;
use serde::{Deserialize, Serialize};

use crate::error::FheError;
use crate::handle::{ExternalInput, Handle, Proof, Width};

/// On-chain primitives of the encryption service.
///
/// Calls are synchronous: they run inside a contract operation. `executor` is
/// the contract issuing the computation and must hold access to every operand;
/// it automatically gains access to every result.
pub trait EncryptedValueService: Send + Sync {
    /// Check an input proof and import the ciphertext for use by `contract`.
    fn verify_and_import(
        &self,
        input: &ExternalInput,
        expected: Width,
        contract: Address,
        caller: Address,
    ) -> Result<Handle, FheError>;

    /// Grant `grantee` persistent access to `handle`.
    fn allow(&self, handle: &Handle, grantee: Address) -> Result<(), FheError>;

    /// Grant every `(handle, grantee)` pair. Either all grants apply or none does.
    fn allow_all(&self, grants: &[(Handle, Address)]) -> Result<(), FheError>;

    fn is_allowed(&self, handle: &Handle, account: Address) -> bool;

    /// Homomorphic addition. Both operands must share a width; the sum wraps.
    fn add(&self, executor: Address, lhs: &Handle, rhs: &Handle) -> Result<Handle, FheError>;

    /// Re-encrypt the same value at a wider width.
    fn widen(&self, executor: Address, handle: &Handle, to: Width) -> Result<Handle, FheError>;

    fn make_publicly_decryptable(&self, executor: Address, handle: &Handle)
    -> Result<(), FheError>;

    /// Mark every handle publicly decryptable. Either all are marked or none is.
    fn make_all_publicly_decryptable(
        &self,
        executor: Address,
        handles: &[Handle],
    ) -> Result<(), FheError>;

    fn is_publicly_decryptable(&self, handle: &Handle) -> bool;

    /// Verify that `abi_encoded` are the true clear values of `handles`, in order.
    fn verify_signatures(
        &self,
        handles: &[Handle],
        abi_encoded: &[u8],
        proof: &Proof,
    ) -> Result<(), FheError>;
}

/// Result of a public decryption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicDecryption {
    /// Clear values in the order the handles were requested.
    pub clear_values: Vec<(Handle, u128)>,
    pub abi_encoded: Vec<u8>,
    pub proof: Proof,
}

impl PublicDecryption {
    pub fn values(&self) -> Vec<u128> {
        self.clear_values.iter().map(|(_, v)| *v).collect()
    }
}

/// Off-chain client side of the encryption service (the SDK a frontend uses).
#[async_trait]
pub trait Relayer: Send + Sync {
    /// Encrypt `value` for use by `caller` in a transaction to `contract`.
    async fn encrypt(
        &self,
        value: u128,
        width: Width,
        contract: Address,
        caller: Address,
    ) -> Result<ExternalInput, FheError>;

    /// Decrypt handles previously marked publicly decryptable.
    async fn public_decrypt(&self, handles: &[Handle]) -> Result<PublicDecryption, FheError>;

    /// Decrypt a handle on behalf of `user`. Both `user` and `contract` must
    /// hold access to it, and `user` must not be the contract itself.
    async fn user_decrypt(
        &self,
        handle: &Handle,
        contract: Address,
        user: Address,
    ) -> Result<u128, FheError>;
}
