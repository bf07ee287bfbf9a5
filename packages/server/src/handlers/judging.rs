use axum::Json;
use axum::extract::{Path, State};
use hackathon::{DecryptedScore, HackathonDetails, HackathonId, SubmissionId};
use tracing::instrument;

use crate::error::AppError;
use crate::events;
use crate::extractors::caller::Caller;
use crate::extractors::json::AppJson;
use crate::models::judging::*;
use crate::relay;
use crate::state::AppState;

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id))]
pub async fn grant_judge_access(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<HackathonDetails>, AppError> {
    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    contract.grant_judge_access(&ctx, id)?;
    events::flush(&mut contract);
    Ok(Json(contract.hackathon_details(id)?))
}

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id))]
pub async fn calculate_winners(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<AggregatesResponse>, AppError> {
    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    contract.calculate_winners(&ctx, id)?;
    events::flush(&mut contract);
    let handles = contract.aggregate_handles(id)?.to_vec();
    Ok(Json(AggregatesResponse { handles }))
}

pub async fn aggregates(
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<AggregatesResponse>, AppError> {
    let handles = state.contract.lock().await.aggregate_handles(id)?.to_vec();
    Ok(Json(AggregatesResponse { handles }))
}

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id))]
pub async fn submit_decrypted_scores(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
    AppJson(payload): AppJson<DecryptedScoresRequest>,
) -> Result<Json<WinnersResponse>, AppError> {
    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    contract.submit_decrypted_scores(&ctx, id, payload.clear_scores, payload.proof)?;
    events::flush(&mut contract);
    let winners = contract.winners(id)?.to_vec();
    Ok(Json(WinnersResponse { winners }))
}

/// Poll public decryption and submit the result in one call.
pub async fn finalize(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<WinnersResponse>, AppError> {
    let winners = relay::publish_results(&state, id, caller).await?;
    Ok(Json(WinnersResponse { winners }))
}

pub async fn winners(
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<WinnersResponse>, AppError> {
    let winners = state.contract.lock().await.winners(id)?.to_vec();
    Ok(Json(WinnersResponse { winners }))
}

pub async fn decrypted_score(
    State(state): State<AppState>,
    Path((id, submission_id)): Path<(HackathonId, SubmissionId)>,
) -> Result<Json<DecryptedScore>, AppError> {
    let score = state
        .contract
        .lock()
        .await
        .decrypted_score(id, submission_id)?;
    Ok(Json(score))
}
