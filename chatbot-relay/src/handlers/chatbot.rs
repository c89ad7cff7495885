use crate::models::{ChatbotRequest, ChatbotResponse};
use crate::services::metrics::record_upstream_request;
use crate::services::QueryError;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

const QUESTION_REQUIRED: &str = "Question is required";

/// `POST /api/chatbot`: relay one question to the document-query API.
///
/// A body that is not JSON, lacks `question`, or carries only whitespace is
/// rejected with 400 before anything is sent upstream.
pub async fn chatbot(
    State(state): State<AppState>,
    payload: Option<Json<ChatbotRequest>>,
) -> Result<Json<ChatbotResponse>, AppError> {
    let Some(Json(request)) = payload else {
        return Err(AppError::BadRequest(QUESTION_REQUIRED.to_string()));
    };

    request
        .validate()
        .map_err(|_| AppError::BadRequest(QUESTION_REQUIRED.to_string()))?;

    let result = state.document_query.query(&request.question).await;
    record_upstream_request(outcome_label(&result));

    let answer = result.map_err(|e| {
        if !matches!(e, QueryError::Upstream { .. }) {
            tracing::error!(error = %e, "Error querying Supervity API");
        }
        AppError::from(e)
    })?;

    Ok(Json(ChatbotResponse { response: answer }))
}

fn outcome_label<T>(result: &Result<T, QueryError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(QueryError::Upstream { .. }) => "upstream_error",
        Err(QueryError::Transport(_)) => "transport_error",
        Err(QueryError::Decode(_)) | Err(QueryError::Malformed(_)) => "decode_error",
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Upstream { status, .. } => AppError::Upstream {
                service: "Supervity".to_string(),
                status,
            },
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}
