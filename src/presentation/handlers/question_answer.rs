use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use super::question_request::QuestionRequest;
use crate::application::ports::{FileLoader, LlmClient, TextSplitter};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

const DOCUMENT_NOT_FOUND: &str = "Document not found";

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn question_answer_handler<F, T, L>(
    State(state): State<AppState<F, T, L>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    F: FileLoader + 'static,
    T: TextSplitter + 'static + ?Sized,
    L: LlmClient + 'static,
{
    let body = match payload {
        Ok(Json(body)) => body,
        // A body sent without a JSON content type is not parsed at all.
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected request body");
            return (
                rejection.status(),
                Json(DetailResponse {
                    detail: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    let request = match QuestionRequest::validate(&body) {
        Ok(request) => request,
        Err(errors) => {
            tracing::warn!(?errors, "Question validation failed");
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }
    };

    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing question");

    match state.retrieval_service.answer(&request.question).await {
        Ok(response) => {
            tracing::info!(sources_count = response.sources.len(), "Question answered");
            (
                StatusCode::OK,
                Json(AnswerResponse {
                    answer: response.answer,
                }),
            )
                .into_response()
        }
        Err(e) if e.is_document_not_found() => {
            tracing::warn!(error = %e, "Source document missing");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: DOCUMENT_NOT_FOUND.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Question answering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
