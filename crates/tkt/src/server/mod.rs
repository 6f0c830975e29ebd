use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{channel, status, widget};
use crate::types::AppState;

mod endpoints;
mod types;

pub use types::ApiErrorType;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let widget_router = Router::new()
        .route("/today", get(widget::get_today))
        .route("/day/:day", get(widget::get_day));

    Router::new()
        .route("/health", get(status::get_health))
        .nest("/widget", widget_router)
        .route("/channel/:method", post(channel::post_method))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::alarm::{AlarmCapabilityBridge, SdkVersion, StaticPlatform};
    use crate::channel::MethodChannel;
    use crate::course::{CourseRecord, ScheduleWidget, COURSES_KEY};
    use crate::store::MemoryStore;

    fn state(platform: Arc<StaticPlatform>) -> Arc<AppState> {
        let store = Arc::new(MemoryStore::new());
        let courses: Vec<String> = [
            CourseRecord::new("Math", "A101", 3, 4, 2),
            CourseRecord::new("Lab", "B2", 1, 2, 2),
        ]
        .iter()
        .map(|c| serde_json::to_string(c).unwrap())
        .collect();
        store.insert(COURSES_KEY, serde_json::to_string(&courses).unwrap());

        let widget = Arc::new(ScheduleWidget::new(store, COURSES_KEY));
        let bridge = AlarmCapabilityBridge::new(platform, "com.example.tkt").unwrap();
        let channel = MethodChannel::new(Arc::new(bridge), widget.clone());
        Arc::new(AppState::new(widget, channel))
    }

    fn router(sdk: u32) -> Router {
        create_router(state(Arc::new(StaticPlatform::new(SdkVersion(sdk), false))))
    }

    async fn send(router: Router, method: Method, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn get(router: Router, uri: &str) -> Response {
        send(router, Method::GET, uri, "").await
    }

    async fn json_body(response: Response) -> Value {
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get(router(33), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_widget_day() {
        let response = get(router(33), "/widget/day/2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({
                "state": "courses",
                "courses": [
                    { "name": "Lab", "time_label": "第 1-2 節" },
                    { "name": "Math", "time_label": "第 3-4 節" },
                ]
            })
        );

        let response = get(router(33), "/widget/day/4").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "state": "empty" }));
    }

    #[tokio::test]
    async fn test_widget_day_invalid() {
        for day in ["0", "8", "300", "monday", "-1"] {
            let response = get(router(33), &format!("/widget/day/{day}")).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "day {day}");
            let body = json_body(response).await;
            assert_eq!(body["error"], "Invalid weekday", "day {day}");
            assert!(body["context"].is_string(), "day {day}");
        }
    }

    #[tokio::test]
    async fn test_widget_today() {
        let response = get(router(33), "/widget/today").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["state"].is_string());
    }

    #[tokio::test]
    async fn test_channel_exact_alarm_methods() {
        let response = send(router(30), Method::POST, "/channel/isExactAlarmAllowed", "").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "result": true }));

        let response = send(router(33), Method::POST, "/channel/isExactAlarmAllowed", "").await;
        assert_eq!(json_body(response).await, json!({ "result": false }));

        let platform = Arc::new(StaticPlatform::new(SdkVersion(33), false));
        let app = create_router(state(platform.clone()));
        let response = send(app, Method::POST, "/channel/openExactAlarmSettings", "").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "result": true }));
        assert_eq!(platform.launch_count(), 1);
    }

    #[tokio::test]
    async fn test_channel_with_arguments() {
        let response = send(
            router(33),
            Method::POST,
            "/channel/todayCourses",
            r#"{ "day": 2 }"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["result"]["courses"][0]["name"], "Lab");

        let response = send(router(33), Method::POST, "/channel/todayCourses", "{ nope").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Invalid method arguments");

        let response = send(
            router(33),
            Method::POST,
            "/channel/todayCourses",
            r#"{ "day": 9 }"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_argument");
    }

    #[tokio::test]
    async fn test_channel_unknown_method() {
        let response = send(router(33), Method::POST, "/channel/cancelAlarm", "").await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        let body = json_body(response).await;
        assert_eq!(body["error"], "not_implemented");
        assert_eq!(body["context"], "Method not implemented: cancelAlarm");
    }

    #[tokio::test]
    async fn test_unrouted_paths() {
        let response = get(router(33), "/widget").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(router(33), "/channel/isExactAlarmAllowed").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
