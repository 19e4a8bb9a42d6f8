use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::screening::pipeline::{
    self, SubmitAnswersRequest, SubmitAnswersResponse, SubmitDetailsRequest,
    SubmitDetailsResponse, SubmitLanguagesRequest, SubmitLanguagesResponse,
};
use crate::screening::questions::{self, DEFAULT_POOL_SIZE};
use crate::state::AppState;

/// POST /candidate/submitDetails
pub async fn handle_submit_details(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitDetailsRequest>,
) -> Result<Json<SubmitDetailsResponse>, AppError> {
    let response = pipeline::submit_details(state.store.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /candidate/submitLanguages
pub async fn handle_submit_languages(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitLanguagesRequest>,
) -> Result<Json<SubmitLanguagesResponse>, AppError> {
    let response =
        pipeline::submit_languages(state.store.clone(), state.oracle.clone(), request).await?;
    Ok(Json(response))
}

/// POST /candidate/submitAnswers
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitAnswersRequest>,
) -> Result<Json<SubmitAnswersResponse>, AppError> {
    let response = pipeline::submit_answers(
        state.store.clone(),
        state.oracle.clone(),
        state.notifier.clone(),
        request,
    )
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct PoolResponse {
    pub questions: Vec<String>,
}

/// GET /generate-questions
pub async fn handle_generate_pool(
    State(state): State<AppState>,
) -> Result<Json<PoolResponse>, AppError> {
    let questions = questions::generate_pool(state.oracle.as_ref(), DEFAULT_POOL_SIZE)
        .await
        .map_err(|e| AppError::Oracle(e.to_string()))?;
    Ok(Json(PoolResponse { questions }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::notify::fake::RecordingNotifier;
    use crate::oracle::fake::ScriptedOracle;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::store::memory::MemoryCandidateStore;

    fn app() -> Router {
        let state = AppState {
            store: Arc::new(MemoryCandidateStore::new()),
            oracle: Arc::new(ScriptedOracle::new(Ok("A question?".to_string()))),
            notifier: Arc::new(RecordingNotifier::new()),
        };
        build_router(state)
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> StatusCode {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_missing_detail_field_is_bad_request() {
        // No `email` key at all: the body never reaches the pipeline, but the
        // contract still promises 400, not the extractor default of 422.
        let status = post_json(
            app(),
            "/candidate/submitDetails",
            r#"{"fullName":"Ada","idNumber":"X-1"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_languages_field_is_bad_request() {
        let status = post_json(
            app(),
            "/candidate/submitLanguages",
            r#"{"candidateId":"00000000-0000-0000-0000-000000000000"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_answers_field_is_bad_request() {
        let status = post_json(
            app(),
            "/candidate/submitAnswers",
            r#"{"candidateId":"00000000-0000-0000-0000-000000000000"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let status = post_json(app(), "/candidate/submitDetails", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_details_body_is_accepted() {
        let status = post_json(
            app(),
            "/candidate/submitDetails",
            r#"{"fullName":"Ada Lovelace","idNumber":"X-1815","email":"ada@example.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_candidate_is_not_found() {
        let status = post_json(
            app(),
            "/candidate/submitLanguages",
            r#"{
                "candidateId":"00000000-0000-0000-0000-000000000000",
                "languages":[
                    {"name":"Rust","proficiency":9},
                    {"name":"Go","proficiency":6},
                    {"name":"Python","proficiency":4}
                ]
            }"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
