use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::course::Weekday;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /widget/today
/// Returns the widget view for the current local weekday
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_today(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /widget/today");
    (StatusCode::OK, Json(s.widget.view_today())).into_response()
}

/// GET /widget/day/:day
/// Returns the widget view for a weekday (1 = Monday ... 7 = Sunday)
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_day(Path(day): Path<String>, State(s): State<Arc<AppState>>) -> Response {
    info!("GET /widget/day/{}", day);

    match parse_weekday(&day) {
        Ok(day) => (StatusCode::OK, Json(s.widget.view_for(day))).into_response(),
        Err(context) => ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "Invalid weekday",
            Some(context),
        ))
        .into_response(),
    }
}

fn parse_weekday(day: &str) -> Result<Weekday, String> {
    let code = day
        .parse::<u8>()
        .map_err(|e| format!("Cannot parse {day:?} as a weekday: {e}"))?;
    Weekday::new(code).map_err(|e| e.to_string())
}
