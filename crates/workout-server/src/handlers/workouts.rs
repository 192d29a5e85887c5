//! Workout handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use workout_core::{ApiStatus, HistoryRequest, HistoryResponse, LogRequest, LogResponse};

pub async fn log(
    State(state): State<AppState>,
    Json(req): Json<LogRequest>,
) -> Result<Json<LogResponse>, ApiError> {
    let entry = state
        .workouts
        .log(
            req.claimed_user_id(),
            req.details(),
            req.category(),
        )
        .await?;

    Ok(Json(LogResponse {
        status: ApiStatus::Success,
        message: "Workout logged!".to_string(),
        entry,
    }))
}

pub async fn history(
    State(state): State<AppState>,
    Json(req): Json<HistoryRequest>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.workouts.history(req.claimed_user_id()).await?;

    Ok(Json(HistoryResponse {
        status: ApiStatus::Success,
        history,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::router;
    use crate::storage::Database;
    use crate::AppState;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use workout_core::{
        AuthorizedUser, MemoryStore, NewWorkoutEntry, Result, UserId, WorkoutEntry, WorkoutError,
        WorkoutLog, WorkoutStore,
    };

    const OWNER: i64 = 6629263251;

    /// A store whose disk has gone away
    struct BrokenStore;

    #[async_trait]
    impl WorkoutStore for BrokenStore {
        async fn append(&self, _entry: NewWorkoutEntry) -> Result<WorkoutEntry> {
            Err(WorkoutError::storage("disk I/O error"))
        }

        async fn recent(&self, _user_id: UserId, _limit: usize) -> Result<Vec<WorkoutEntry>> {
            Err(WorkoutError::storage("disk I/O error"))
        }
    }

    fn app_with(store: Arc<dyn WorkoutStore>) -> axum::Router {
        let state = AppState {
            workouts: WorkoutLog::new(store, AuthorizedUser::new(OWNER)),
        };
        router(state)
    }

    async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_log_then_history() {
        let app = app_with(Arc::new(MemoryStore::new()));

        let (status, body) = post(
            &app,
            "/api/log",
            json!({ "user_id": OWNER, "entry": "30 min run", "type": "Running" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Workout logged!");
        assert_eq!(body["entry"]["type"], "Running");

        let (status, body) = post(&app, "/api/history", json!({ "user_id": OWNER })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["entry"], "30 min run");
        assert_eq!(history[0]["timestamp"].as_str().unwrap().len(), 19);
    }

    #[tokio::test]
    async fn test_wrong_user_gets_403_and_nothing_is_stored() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with(store.clone());

        for user_id in [json!(1), json!(OWNER.to_string()), json!(null)] {
            let (status, body) = post(
                &app,
                "/api/log",
                json!({ "user_id": user_id, "entry": "run", "type": "Running" }),
            )
            .await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(
                body,
                json!({ "status": "error", "message": "Unauthorized user." })
            );
        }
        assert!(store.is_empty());

        let (status, _) = post(&app, "/api/history", json!({ "user_id": 2 })).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = post(&app, "/api/history", json!({})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_wrong_user_with_odd_fields_still_gets_403() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with(store.clone());

        for body in [
            json!({ "user_id": 1, "entry": 5 }),
            json!({ "user_id": 1, "entry": "run", "type": 7 }),
            json!({ "user_id": 1, "entry": ["run"], "type": { "a": 1 } }),
        ] {
            let (status, body) = post(&app, "/api/log", body).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(
                body,
                json!({ "status": "error", "message": "Unauthorized user." })
            );
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = app_with(Arc::new(BrokenStore));
        let expected = json!({ "status": "error", "message": "Storage error: disk I/O error" });

        let (status, body) = post(
            &app,
            "/api/log",
            json!({ "user_id": OWNER, "entry": "run", "type": "Running" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, expected);

        let (status, body) = post(&app, "/api/history", json!({ "user_id": OWNER })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_non_string_entry_from_owner_is_bad_request() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, body) = post(&app, "/api/log", json!({ "user_id": OWNER, "entry": 5 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Workout entry is empty.");
    }

    #[tokio::test]
    async fn test_blank_entry_is_bad_request() {
        let app = app_with(Arc::new(MemoryStore::new()));

        let (status, body) = post(&app, "/api/log", json!({ "user_id": OWNER })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Workout entry is empty.");
    }

    #[tokio::test]
    async fn test_history_against_sqlite_newest_first() {
        let db = Database::in_memory().await.unwrap();
        let app = app_with(Arc::new(db));

        for i in 1..=6 {
            let (status, _) = post(
                &app,
                "/api/log",
                json!({ "user_id": OWNER, "entry": format!("set {}", i), "type": "Lifting" }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = post(&app, "/api/history", json!({ "user_id": OWNER })).await;
        let entries: Vec<&str> = body["history"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["entry"].as_str().unwrap())
            .collect();
        assert_eq!(entries, ["set 6", "set 5", "set 4", "set 3", "set 2"]);
    }
}
