use fhe::{ExternalInput, Handle, Proof};
use serde::{Deserialize, Serialize};

/// Ciphertext handle plus input proof, as returned by `POST /fhe/encrypt`.
#[derive(Deserialize)]
pub struct EncryptedInputRequest {
    pub handle: Handle,
    pub proof: Proof,
}

impl From<EncryptedInputRequest> for ExternalInput {
    fn from(req: EncryptedInputRequest) -> Self {
        ExternalInput {
            handle: req.handle,
            proof: req.proof,
        }
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: u64,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: u64,
}
