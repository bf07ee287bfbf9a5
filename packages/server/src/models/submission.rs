use fhe::Handle;
use serde::Serialize;

/// Encrypted content reference of a submission, readable by judges through
/// user decryption.
#[derive(Serialize)]
pub struct ReferenceResponse {
    pub handle: Handle,
}

#[derive(Serialize)]
pub struct SubmissionCreatedResponse {
    pub id: u32,
}
