use fhe::{Handle, Proof};
use hackathon::Winner;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct AggregatesResponse {
    /// Aggregate score handles in submission order.
    pub handles: Vec<Handle>,
}

#[derive(Deserialize)]
pub struct DecryptedScoresRequest {
    /// One clear aggregate per submission, in submission order.
    pub clear_scores: Vec<u32>,
    pub proof: Proof,
}

#[derive(Serialize)]
pub struct WinnersResponse {
    pub winners: Vec<Winner>,
}
