use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::channel::{ChannelError, MethodCall};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// POST /channel/:method
/// Dispatches a method call. The optional JSON body holds the arguments.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_method(
    Path(method): Path<String>,
    State(s): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    info!("POST /channel/{}", method);

    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(arguments) => arguments,
            Err(e) => {
                return ApiErrorType::from((
                    StatusCode::BAD_REQUEST,
                    "Invalid method arguments",
                    Some(e.to_string()),
                ))
                .into_response()
            }
        }
    };

    // Platform queries may shell out, keep them off the async workers
    let call = MethodCall::with_arguments(method, arguments);
    let outcome = tokio::task::spawn_blocking(move || s.channel.invoke(&call)).await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, Json(json!({ "result": result }))).into_response(),
        Ok(Err(e)) => channel_error_to_response(&e),
        Err(e) => {
            error!("Method call task failed: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Method call failed",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// Converts ChannelError to API response.
fn channel_error_to_response(error: &ChannelError) -> Response {
    let status = match error {
        ChannelError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
        ChannelError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
    };
    ApiErrorType::from((status, error.code(), Some(error.to_string()))).into_response()
}
