//! In-process encryption backend for tests and local development.
//!
//! Ciphertexts keep their plaintext in memory and proofs are SHA-256 digests
//! keyed by a signer secret. The call contract, ACL rules and proof checks
//! match the production service, so the contract cannot tell the difference.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use common::Address;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::abi;
use crate::error::FheError;
use crate::handle::{ExternalInput, Handle, Proof, Width};
use crate::service::{EncryptedValueService, PublicDecryption, Relayer};

const INPUT_DOMAIN: &[u8] = b"input-proof";
const DECRYPT_DOMAIN: &[u8] = b"decryption-proof";

#[derive(Debug, Clone, Copy)]
struct Ciphertext {
    width: Width,
    value: u128,
}

#[derive(Debug, Default)]
struct State {
    nonce: u64,
    ciphertexts: HashMap<Handle, Ciphertext>,
    acl: HashSet<(Handle, Address)>,
    public: HashSet<Handle>,
    /// Injected failures for the next public decryption requests.
    failing_decrypts: u32,
}

impl State {
    fn mint(&mut self, width: Width, value: u128) -> Handle {
        self.nonce += 1;
        let digest = Sha256::new()
            .chain_update(b"handle")
            .chain_update(self.nonce.to_be_bytes())
            .chain_update(width.bits().to_be_bytes())
            .finalize();
        let handle = Handle::from_bytes(digest.into());
        self.ciphertexts.insert(handle, Ciphertext { width, value });
        handle
    }

    fn get(&self, handle: &Handle) -> Result<Ciphertext, FheError> {
        self.ciphertexts
            .get(handle)
            .copied()
            .ok_or(FheError::UnknownHandle(*handle))
    }

    fn require_access(&self, handle: &Handle, account: Address) -> Result<Ciphertext, FheError> {
        let ct = self.get(handle)?;
        if !self.acl.contains(&(*handle, account)) {
            return Err(FheError::AccessDenied {
                handle: *handle,
                account,
            });
        }
        Ok(ct)
    }
}

/// Simulated encryption service. Clones share the same state.
#[derive(Clone)]
pub struct LocalFhe {
    signer_key: Arc<[u8]>,
    state: Arc<Mutex<State>>,
}

impl LocalFhe {
    pub fn new(signer_key: impl AsRef<[u8]>) -> Self {
        Self {
            signer_key: Arc::from(signer_key.as_ref()),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Make the next `n` public decryption requests fail as unavailable.
    pub fn fail_next_public_decrypts(&self, n: u32) {
        self.lock().failing_decrypts = n;
    }

    /// Sign a decryption result with this backend's key.
    pub fn sign_decryption(&self, handles: &[Handle], abi_encoded: &[u8]) -> Proof {
        let mut hasher = self.hasher(DECRYPT_DOMAIN);
        for handle in handles {
            hasher.update(handle.as_bytes());
        }
        hasher.update(abi_encoded);
        Proof::new(hasher.finalize().to_vec())
    }

    fn sign_input(&self, handle: &Handle, contract: Address, caller: Address) -> Proof {
        let digest = self
            .hasher(INPUT_DOMAIN)
            .chain_update(handle.as_bytes())
            .chain_update(contract.as_bytes())
            .chain_update(caller.as_bytes())
            .finalize();
        Proof::new(digest.to_vec())
    }

    fn hasher(&self, domain: &[u8]) -> Sha256 {
        Sha256::new()
            .chain_update(&self.signer_key)
            .chain_update(domain)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Encrypt synchronously. The async [`Relayer::encrypt`] delegates here.
    pub fn encrypt_value(
        &self,
        value: u128,
        width: Width,
        contract: Address,
        caller: Address,
    ) -> Result<ExternalInput, FheError> {
        if !width.fits(value) {
            return Err(FheError::ValueOutOfRange { value, width });
        }
        let handle = self.lock().mint(width, value);
        Ok(ExternalInput {
            handle,
            proof: self.sign_input(&handle, contract, caller),
        })
    }

    /// Decrypt publicly decryptable handles and sign the result.
    pub fn decrypt_public(&self, handles: &[Handle]) -> Result<PublicDecryption, FheError> {
        let clear_values = {
            let mut state = self.lock();
            if state.failing_decrypts > 0 {
                state.failing_decrypts -= 1;
                return Err(FheError::Unavailable("decryption not ready".into()));
            }

            handles
                .iter()
                .map(|h| {
                    if !state.public.contains(h) {
                        return Err(FheError::NotPubliclyDecryptable(*h));
                    }
                    state.get(h).map(|ct| (*h, ct.value))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let values: Vec<u128> = clear_values.iter().map(|(_, v)| *v).collect();
        let abi_encoded = abi::encode_words(&values);
        let proof = self.sign_decryption(handles, &abi_encoded);
        debug!(count = handles.len(), "Public decryption served");

        Ok(PublicDecryption {
            clear_values,
            abi_encoded,
            proof,
        })
    }

    /// Decrypt a handle for an account on its access list.
    ///
    /// The contract holds access to every value it computes on, so it can
    /// never be the decrypting user.
    pub fn decrypt_for(
        &self,
        handle: &Handle,
        contract: Address,
        user: Address,
    ) -> Result<u128, FheError> {
        if user == contract {
            return Err(FheError::AccessDenied {
                handle: *handle,
                account: user,
            });
        }
        let state = self.lock();
        state.require_access(handle, contract)?;
        state.require_access(handle, user).map(|ct| ct.value)
    }
}

impl EncryptedValueService for LocalFhe {
    fn verify_and_import(
        &self,
        input: &ExternalInput,
        expected: Width,
        contract: Address,
        caller: Address,
    ) -> Result<Handle, FheError> {
        let ct = self.lock().get(&input.handle)?;
        if self.sign_input(&input.handle, contract, caller) != input.proof {
            return Err(FheError::InvalidInputProof(input.handle));
        }
        if ct.width != expected {
            return Err(FheError::WidthMismatch {
                expected,
                actual: ct.width,
            });
        }
        Ok(input.handle)
    }

    fn allow(&self, handle: &Handle, grantee: Address) -> Result<(), FheError> {
        let mut state = self.lock();
        state.get(handle)?;
        state.acl.insert((*handle, grantee));
        Ok(())
    }

    fn allow_all(&self, grants: &[(Handle, Address)]) -> Result<(), FheError> {
        let mut state = self.lock();
        for (handle, _) in grants {
            state.get(handle)?;
        }
        state.acl.extend(grants.iter().copied());
        Ok(())
    }

    fn is_allowed(&self, handle: &Handle, account: Address) -> bool {
        self.lock().acl.contains(&(*handle, account))
    }

    fn add(&self, executor: Address, lhs: &Handle, rhs: &Handle) -> Result<Handle, FheError> {
        let mut state = self.lock();
        let a = state.require_access(lhs, executor)?;
        let b = state.require_access(rhs, executor)?;
        if a.width != b.width {
            return Err(FheError::WidthMismatch {
                expected: a.width,
                actual: b.width,
            });
        }

        let sum = a.value.wrapping_add(b.value) & a.width.max_value();
        let out = state.mint(a.width, sum);
        state.acl.insert((out, executor));
        Ok(out)
    }

    fn widen(&self, executor: Address, handle: &Handle, to: Width) -> Result<Handle, FheError> {
        let mut state = self.lock();
        let ct = state.require_access(handle, executor)?;
        if to < ct.width {
            return Err(FheError::NarrowingCast { from: ct.width, to });
        }

        let out = state.mint(to, ct.value);
        state.acl.insert((out, executor));
        Ok(out)
    }

    fn make_publicly_decryptable(
        &self,
        executor: Address,
        handle: &Handle,
    ) -> Result<(), FheError> {
        let mut state = self.lock();
        state.require_access(handle, executor)?;
        state.public.insert(*handle);
        Ok(())
    }

    fn make_all_publicly_decryptable(
        &self,
        executor: Address,
        handles: &[Handle],
    ) -> Result<(), FheError> {
        let mut state = self.lock();
        for handle in handles {
            state.require_access(handle, executor)?;
        }
        state.public.extend(handles.iter().copied());
        Ok(())
    }

    fn is_publicly_decryptable(&self, handle: &Handle) -> bool {
        self.lock().public.contains(handle)
    }

    fn verify_signatures(
        &self,
        handles: &[Handle],
        abi_encoded: &[u8],
        proof: &Proof,
    ) -> Result<(), FheError> {
        {
            let state = self.lock();
            if let Some(h) = handles.iter().find(|h| !state.public.contains(*h)) {
                return Err(FheError::NotPubliclyDecryptable(*h));
            }
        }
        let values = abi::decode_words(abi_encoded)?;
        if values.len() != handles.len() || self.sign_decryption(handles, abi_encoded) != *proof {
            return Err(FheError::InvalidDecryptionProof);
        }
        Ok(())
    }
}

#[async_trait]
impl Relayer for LocalFhe {
    async fn encrypt(
        &self,
        value: u128,
        width: Width,
        contract: Address,
        caller: Address,
    ) -> Result<ExternalInput, FheError> {
        self.encrypt_value(value, width, contract, caller)
    }

    async fn public_decrypt(&self, handles: &[Handle]) -> Result<PublicDecryption, FheError> {
        self.decrypt_public(handles)
    }

    async fn user_decrypt(
        &self,
        handle: &Handle,
        contract: Address,
        user: Address,
    ) -> Result<u128, FheError> {
        self.decrypt_for(handle, contract, user)
    }
}
