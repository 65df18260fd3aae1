//! Request handlers for the HTTP front end
//!
//! Failures are turned into responses by downcasting to [`SleuthError`]:
//! client errors become a 400 carrying the error message, everything else is
//! logged and hidden behind a generic 500.

use super::AppState;
use crate::error::SleuthError;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

/// Body of `GET /`
pub const GREETING_HTML: &str = "<h2>Hello , Chat API</h2>";

/// Question carried in the query string or JSON body
#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    /// Question to put to the assistant; blank counts as missing
    #[serde(default)]
    pub question: Option<String>,
}

/// Successful reply; `response` is null when the run produced no text
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    /// Assistant reply text
    pub response: Option<String>,
}

/// Body of every 4xx/5xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable reason
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Map a pipeline error to a response
fn failure_response(e: &anyhow::Error) -> Response {
    match e.downcast_ref::<SleuthError>() {
        Some(kind) if kind.is_client_error() => {
            tracing::debug!("Rejected request: {}", kind);
            error_response(StatusCode::BAD_REQUEST, kind.to_string())
        }
        _ => {
            tracing::error!("Failed to answer question: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// GET / liveness check
pub(super) async fn handle_index() -> Html<&'static str> {
    Html(GREETING_HTML)
}

/// GET /ask?question=...
pub(super) async fn handle_ask_query(
    State(state): State<AppState>,
    request: Result<Query<AskRequest>, QueryRejection>,
) -> Response {
    match request {
        Ok(Query(request)) => answer(&state, request).await,
        Err(rejection) => {
            failure_response(&SleuthError::InvalidRequest(rejection.body_text()).into())
        }
    }
}

/// POST /ask with `{"question": ...}`
pub(super) async fn handle_ask_json(
    State(state): State<AppState>,
    request: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    match request {
        Ok(Json(request)) => answer(&state, request).await,
        Err(rejection) => {
            failure_response(&SleuthError::InvalidRequest(rejection.body_text()).into())
        }
    }
}

async fn answer(state: &AppState, request: AskRequest) -> Response {
    let Some(question) = request
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    else {
        return failure_response(&SleuthError::MissingQuestion.into());
    };

    let span = tracing::info_span!("ask", question_len = question.len());
    match state.ask(question).instrument(span).await {
        Ok(response) => Json(AskResponse { response }).into_response(),
        Err(e) => failure_response(&e),
    }
}
