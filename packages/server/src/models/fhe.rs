use common::Address;
use fhe::{Handle, Width};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct EncryptRequest {
    pub value: u128,
    pub width: Width,
    /// Defaults to the deployed contract.
    pub contract: Option<Address>,
}

#[derive(Deserialize)]
pub struct PublicDecryptRequest {
    pub handles: Vec<Handle>,
}

#[derive(Deserialize)]
pub struct UserDecryptRequest {
    pub handle: Handle,
}

#[derive(Serialize)]
pub struct UserDecryptResponse {
    pub value: u128,
}
