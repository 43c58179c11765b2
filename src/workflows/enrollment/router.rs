use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::committer::EnrollmentError;
use super::domain::{EnrollmentTarget, TransferId};
use super::repository::EnrollmentRepository;
use super::service::TransferService;
use crate::repository::Clock;
use crate::workflows::catalog::StudentId;

#[derive(Debug, Deserialize)]
pub struct CandidatePlacementRequest {
    pub student_id: String,
    pub target: EnrollmentTarget,
}

/// Router builder exposing the transfer and candidate placement entry points.
pub fn enrollment_router<R, C>(service: Arc<TransferService<R, C>>) -> Router
where
    R: EnrollmentRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/transfers/:transfer_id/enrollment",
            post(transfer_handler::<R, C>),
        )
        .route("/api/v1/enrollments", post(candidate_handler::<R, C>))
        .with_state(service)
}

fn error_response(err: EnrollmentError) -> Response {
    let status = match &err {
        EnrollmentError::UnknownTransfer { .. } => StatusCode::NOT_FOUND,
        EnrollmentError::AlreadyEnrolled { .. } => StatusCode::CONFLICT,
        EnrollmentError::ClassClosed { .. }
        | EnrollmentError::SeatLimitExceeded { .. }
        | EnrollmentError::NoOutstandingDisciplines
        | EnrollmentError::MissingCurriculum { .. }
        | EnrollmentError::NoSection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EnrollmentError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn transfer_handler<R, C>(
    State(service): State<Arc<TransferService<R, C>>>,
    Path(transfer_id): Path<String>,
) -> Response
where
    R: EnrollmentRepository + 'static,
    C: Clock + 'static,
{
    match service.enroll_transfer(&TransferId(transfer_id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn candidate_handler<R, C>(
    State(service): State<Arc<TransferService<R, C>>>,
    axum::Json(request): axum::Json<CandidatePlacementRequest>,
) -> Response
where
    R: EnrollmentRepository + 'static,
    C: Clock + 'static,
{
    let student = StudentId(request.student_id);
    match service.enroll_candidate(&student, &request.target) {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}
