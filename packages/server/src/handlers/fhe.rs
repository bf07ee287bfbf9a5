//! Client-side SDK calls of the encryption service, for development and tests.

use axum::Json;
use axum::extract::State;
use fhe::{ExternalInput, PublicDecryption};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::caller::Caller;
use crate::extractors::json::AppJson;
use crate::models::fhe::*;
use crate::state::AppState;

/// Encrypt a value for use by the caller in a transaction to the contract.
#[instrument(skip_all, fields(caller = %caller, width = %payload.width))]
pub async fn encrypt(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppJson(payload): AppJson<EncryptRequest>,
) -> Result<Json<ExternalInput>, AppError> {
    let contract = payload
        .contract
        .unwrap_or(state.config.contract.address);
    let input = state
        .relayer
        .encrypt(payload.value, payload.width, contract, caller)
        .await?;
    Ok(Json(input))
}

pub async fn public_decrypt(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PublicDecryptRequest>,
) -> Result<Json<PublicDecryption>, AppError> {
    let result = state.relayer.public_decrypt(&payload.handles).await?;
    Ok(Json(result))
}

/// Decrypt a handle the caller and the deployed contract both hold access to.
pub async fn user_decrypt(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserDecryptRequest>,
) -> Result<Json<UserDecryptResponse>, AppError> {
    let value = state
        .relayer
        .user_decrypt(&payload.handle, state.config.contract.address, caller)
        .await?;
    Ok(Json(UserDecryptResponse { value }))
}
