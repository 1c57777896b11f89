use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::TicketingError;
use crate::types::{
    BuyTicketQuery, CheckResultResponse, DrawResponse, ErrorBody, HealthReport, TicketCreate,
    TicketReceipt,
};
use crate::use_cases::TicketingUseCase;

pub const TICKET_NOT_FOUND: &str = "Ticket not found";

pub fn router(use_case: TicketingUseCase) -> Router {
    Router::new()
        .route("/buy-ticket", post(buy_ticket))
        .route("/draw", post(draw))
        .route("/check-result/{ticket_id}", get(check_result))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .with_state(use_case)
}

/// Failures that leave the API as something other than a 200.
#[derive(Debug)]
pub enum ApiError {
    MissingUserName,
    Internal(TicketingError),
}

impl From<TicketingError> for ApiError {
    fn from(e: TicketingError) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingUserName => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Missing user_name parameter".to_string(),
            ),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// `user_name` comes from the query string, or from a JSON body when the
/// query does not carry one.
async fn buy_ticket(
    State(use_case): State<TicketingUseCase>,
    Query(query): Query<BuyTicketQuery>,
    body: Bytes,
) -> Result<Json<TicketReceipt>, ApiError> {
    let user_name = match query.user_name {
        Some(name) => name,
        None => serde_json::from_slice::<TicketCreate>(&body)
            .map(|req| req.user_name)
            .map_err(|_| ApiError::MissingUserName)?,
    };

    let receipt = use_case.purchase_ticket(&user_name).await?;
    Ok(Json(receipt))
}

async fn draw(State(use_case): State<TicketingUseCase>) -> Json<DrawResponse> {
    let winning_numbers = use_case.draw_winning_numbers().await;
    Json(DrawResponse { winning_numbers })
}

async fn check_result(
    State(use_case): State<TicketingUseCase>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<CheckResultResponse>, ApiError> {
    match use_case.check_result(ticket_id).await {
        Ok(report) => Ok(Json(CheckResultResponse::Report(report))),
        Err(e) if e.is_not_found() => Ok(Json(CheckResultResponse::Error(ErrorBody {
            error: TICKET_NOT_FOUND.to_string(),
        }))),
        Err(e) => Err(e.into()),
    }
}

async fn health(State(use_case): State<TicketingUseCase>) -> Json<HealthReport> {
    Json(use_case.health().await)
}
