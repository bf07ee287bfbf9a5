use axum::{extract::FromRequestParts, http::request::Parts};
use common::Address;

use crate::error::AppError;

pub const CALLER_HEADER: &str = "x-wallet-address";

/// Sender of the transaction, taken from the `X-Wallet-Address` header.
///
/// Add this as a handler parameter for every state-changing operation and for
/// reads that depend on who is asking.
pub struct Caller(pub Address);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::CallerMissing)?;

        let address = raw
            .trim()
            .parse::<Address>()
            .map_err(|e| AppError::Validation(format!("{CALLER_HEADER}: {e}")))?;
        if address.is_zero() {
            return Err(AppError::Validation(format!(
                "{CALLER_HEADER} must not be the zero address"
            )));
        }
        Ok(Caller(address))
    }
}
