use axum::{
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{ApiError, ApiResult},
    middleware::function_key::FunctionKey,
    services::{broadcasts::BroadcastService, metrics},
    AppState,
};

/// POST /: dispatch on the body's `action` field.
pub async fn handle(
    State(state): State<AppState>,
    _key: FunctionKey,
    method: Method,
    body: Bytes,
) -> ApiResult<Response> {
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::validation(format!("Invalid JSON body: {e}")))?
    };
    if !payload.is_object() {
        return Err(ApiError::validation("Request body must be a JSON object"));
    }

    let action = payload
        .get("action")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_ascii_lowercase();

    let result = match action.as_str() {
        "create" => create(&state, payload).await,
        "update" => update(&state, payload).await,
        "delete" => delete(&state, payload).await,
        "" => return Err(ApiError::validation("Missing action (expected create, update or delete)")),
        other => {
            return Err(ApiError::validation(format!(
                "Unknown action '{other}' (expected create, update or delete)"
            )))
        }
    };

    metrics::record_action(&action, result.is_ok());
    result
}

async fn create(state: &AppState, payload: Value) -> ApiResult<Response> {
    let res = BroadcastService::create(state, parse(payload)?).await?;
    Ok(Json(res).into_response())
}

async fn update(state: &AppState, payload: Value) -> ApiResult<Response> {
    let res = BroadcastService::update(state, parse(payload)?).await?;
    Ok(Json(res).into_response())
}

async fn delete(state: &AppState, payload: Value) -> ApiResult<Response> {
    let res = BroadcastService::delete(state, parse(payload)?).await?;
    Ok(Json(res).into_response())
}

fn parse<T: DeserializeOwned>(payload: Value) -> ApiResult<T> {
    serde_json::from_value(payload).map_err(|e| ApiError::validation(format!("Invalid request: {e}")))
}
