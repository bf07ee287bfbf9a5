use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use hackathon::{HackathonId, SubmissionId, SubmissionInfo};
use tracing::instrument;

use crate::error::AppError;
use crate::events;
use crate::extractors::caller::Caller;
use crate::extractors::json::AppJson;
use crate::models::shared::{CountResponse, EncryptedInputRequest};
use crate::models::submission::*;
use crate::state::AppState;

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id))]
pub async fn submit_project(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
    AppJson(payload): AppJson<EncryptedInputRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    let submission_id = contract.submit_project(&ctx, id, payload.into())?;
    events::flush(&mut contract);

    Ok((
        StatusCode::CREATED,
        Json(SubmissionCreatedResponse { id: submission_id }),
    ))
}

pub async fn submission_count(
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.contract.lock().await.submission_count(id)?;
    Ok(Json(CountResponse {
        count: u64::from(count),
    }))
}

pub async fn get_submission(
    State(state): State<AppState>,
    Path((id, submission_id)): Path<(HackathonId, SubmissionId)>,
) -> Result<Json<SubmissionInfo>, AppError> {
    let info = state.contract.lock().await.submission(id, submission_id)?;
    Ok(Json(info))
}

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id, submission_id = submission_id))]
pub async fn get_reference(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path((id, submission_id)): Path<(HackathonId, SubmissionId)>,
) -> Result<Json<ReferenceResponse>, AppError> {
    let ctx = state.context(caller);
    let handle = state
        .contract
        .lock()
        .await
        .encrypted_reference(&ctx, id, submission_id)?;
    Ok(Json(ReferenceResponse { handle }))
}

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id, submission_id = submission_id))]
pub async fn submit_score(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path((id, submission_id)): Path<(HackathonId, SubmissionId)>,
    AppJson(payload): AppJson<EncryptedInputRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    contract.submit_score(&ctx, id, submission_id, payload.into())?;
    events::flush(&mut contract);

    let info = contract.submission(id, submission_id)?;
    Ok((StatusCode::CREATED, Json(info)))
}
