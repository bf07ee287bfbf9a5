//! Off-chain half of result publication.
//!
//! Public decryption is served asynchronously by the encryption service and
//! may not be ready right after `calculate_winners`, so it is polled with a
//! bounded fixed-backoff retry. The contract itself never retries.

use common::Address;
use common::retry::{RetryExhausted, retry};
use hackathon::{HackathonError, HackathonId, Winner};
use thiserror::Error;
use tracing::{info, instrument};

use crate::events;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Contract(#[from] HackathonError),

    #[error("public decryption failed: {0}")]
    Exhausted(#[from] RetryExhausted),

    #[error("decrypted aggregate {0} does not fit in 32 bits")]
    Overflow(u128),
}

/// Decrypt the aggregate scores of a calculated hackathon and submit them,
/// with the decryption proof, as `caller`. Returns the announced winners.
#[instrument(skip(state))]
pub async fn publish_results(
    state: &AppState,
    id: HackathonId,
    caller: Address,
) -> Result<Vec<Winner>, RelayError> {
    let handles = state.contract.lock().await.aggregate_handles(id)?.to_vec();

    let policy = state.config.relay.retry_policy();
    let relayer = state.relayer.as_ref();
    let handles_ref = handles.as_slice();
    let decryption = retry(&policy, "public_decrypt", || {
        relayer.public_decrypt(handles_ref)
    })
    .await?;

    let clear_scores = decryption
        .values()
        .into_iter()
        .map(|v| u32::try_from(v).map_err(|_| RelayError::Overflow(v)))
        .collect::<Result<Vec<_>, _>>()?;
    info!(hackathon_id = id, submissions = clear_scores.len(), "Aggregates decrypted");

    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    contract.submit_decrypted_scores(&ctx, id, clear_scores, decryption.proof)?;
    events::flush(&mut contract);
    Ok(contract.winners(id)?.to_vec())
}
