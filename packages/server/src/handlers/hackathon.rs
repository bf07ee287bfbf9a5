use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::Address;
use hackathon::{HackathonDetails, HackathonId, Participant};
use tracing::instrument;

use crate::error::AppError;
use crate::events;
use crate::extractors::caller::Caller;
use crate::extractors::json::AppJson;
use crate::models::hackathon::*;
use crate::models::shared::{CountResponse, CreatedResponse};
use crate::state::AppState;

#[instrument(skip_all, fields(caller = %caller, name = %payload.name))]
pub async fn create_hackathon(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateHackathonRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_hackathon(&payload)?;

    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    let id = contract.create_hackathon(&ctx, payload.into())?;
    events::flush(&mut contract);

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn hackathon_count(State(state): State<AppState>) -> Json<CountResponse> {
    let count = state.contract.lock().await.hackathon_count();
    Json(CountResponse { count })
}

pub async fn get_hackathon(
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<HackathonDetails>, AppError> {
    let details = state.contract.lock().await.hackathon_details(id)?;
    Ok(Json(details))
}

#[instrument(skip_all, fields(caller = %caller, hackathon_id = id))]
pub async fn register(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state.context(caller);
    let mut contract = state.contract.lock().await;
    contract.register(&ctx, id, payload.into())?;
    events::flush(&mut contract);

    let participant = contract
        .participant(id, caller)?
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("{caller} missing after registration")))?;
    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn list_participants(
    State(state): State<AppState>,
    Path(id): Path<HackathonId>,
) -> Result<Json<Vec<Participant>>, AppError> {
    let participants = state.contract.lock().await.participants(id)?.to_vec();
    Ok(Json(participants))
}

pub async fn get_participant(
    State(state): State<AppState>,
    Path((id, address)): Path<(HackathonId, Address)>,
) -> Result<Json<Participant>, AppError> {
    state
        .contract
        .lock()
        .await
        .participant(id, address)?
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{address} is not registered")))
}

pub async fn is_judge(
    State(state): State<AppState>,
    Path((id, address)): Path<(HackathonId, Address)>,
) -> Result<Json<IsJudgeResponse>, AppError> {
    let is_judge = state.contract.lock().await.is_judge(id, address)?;
    Ok(Json(IsJudgeResponse { is_judge }))
}
