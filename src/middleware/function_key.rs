use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, AppState};

/// Extractor that validates the `X-Function-Key` header against
/// `config.function_key`. Passes every request when no key is configured.
pub struct FunctionKey;

impl FromRequestParts<AppState> for FunctionKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.function_key.as_deref() else {
            return Ok(FunctionKey);
        };

        let key = parts
            .headers
            .get("X-Function-Key")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        if key != expected {
            return Err(ApiError::Unauthorized);
        }

        Ok(FunctionKey)
    }
}
