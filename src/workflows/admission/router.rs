use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::CriteriaId;
use super::evaluator::{AdmissionError, AdmissionEvaluator};
use super::repository::AdmissionRepository;
use crate::repository::{Clock, RepositoryError};

#[derive(Debug, Deserialize)]
pub struct EvaluateBatchRequest {
    pub criteria_id: String,
}

/// Router builder exposing the operator entry point for admission batches.
pub fn admission_router<R, C>(evaluator: Arc<AdmissionEvaluator<R, C>>) -> Router
where
    R: AdmissionRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/admissions/evaluations",
            post(evaluate_handler::<R, C>),
        )
        .with_state(evaluator)
}

pub(crate) async fn evaluate_handler<R, C>(
    State(evaluator): State<Arc<AdmissionEvaluator<R, C>>>,
    axum::Json(request): axum::Json<EvaluateBatchRequest>,
) -> Response
where
    R: AdmissionRepository + 'static,
    C: Clock + 'static,
{
    let criteria_id = CriteriaId(request.criteria_id);
    match evaluator.evaluate_batch(&criteria_id) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(AdmissionError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("admission criteria {} not found", criteria_id),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err @ AdmissionError::AlreadyEvaluated { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(
            err @ (AdmissionError::OutOfWindow { .. }
            | AdmissionError::NoCriteria { .. }
            | AdmissionError::SeatLimitExceeded { .. }
            | AdmissionError::Capacity(_)),
        ) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
