use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::rules::domain::{AgentId, ClientId, ListingId};

use super::repository::{
    AgentProgressRepository, CreditWallet, MarketRepository, RepositoryError, WalletError,
};
use super::service::{DealDeskError, DealDeskService, SaleSubmission};

/// Router builder exposing the deal-desk operations over HTTP.
pub fn desk_router<M, W, P>(service: Arc<DealDeskService<M, W, P>>) -> Router
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    Router::new()
        .route("/api/v1/sales", post(record_sale_handler::<M, W, P>))
        .route(
            "/api/v1/listings/ranked",
            get(ranked_listings_handler::<M, W, P>),
        )
        .route(
            "/api/v1/listings/:listing_id/credit-cost",
            get(credit_cost_handler::<M, W, P>),
        )
        .route(
            "/api/v1/clients/:client_id/credits/spend",
            post(spend_credits_handler::<M, W, P>),
        )
        .route(
            "/api/v1/clients/:client_id/matches/:listing_id",
            get(match_handler::<M, W, P>),
        )
        .route(
            "/api/v1/clients/:client_id/recommendations",
            get(recommendations_handler::<M, W, P>),
        )
        .route(
            "/api/v1/agents/:agent_id/progress",
            get(agent_progress_handler::<M, W, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpendRequest {
    pub(crate) listing_id: String,
}

pub(crate) async fn record_sale_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    axum::Json(submission): axum::Json<SaleSubmission>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    match service.record_sale(submission, Utc::now()) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ranked_listings_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    Query(page): Query<PageQuery>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    match service.ranked_listings(Utc::now(), page.limit) {
        Ok(ranked) => (StatusCode::OK, axum::Json(ranked)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn credit_cost_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    match service.quote_action(&ListingId(listing_id)) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn spend_credits_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    Path(client_id): Path<String>,
    axum::Json(request): axum::Json<SpendRequest>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    let client = ClientId(client_id);
    let listing = ListingId(request.listing_id);
    match service.spend_credits(&client, &listing) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn match_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    Path((client_id, listing_id)): Path<(String, String)>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    match service.match_client(&ClientId(client_id), &ListingId(listing_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    Path(client_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    match service.recommendations(&ClientId(client_id), Utc::now(), page.limit) {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn agent_progress_handler<M, W, P>(
    State(service): State<Arc<DealDeskService<M, W, P>>>,
    Path(agent_id): Path<String>,
) -> Response
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    match service.agent_progress(&AgentId(agent_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DealDeskError) -> Response {
    let status = match &error {
        DealDeskError::Rule(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DealDeskError::UnknownListing(_) | DealDeskError::MissingProfile(_) => {
            StatusCode::NOT_FOUND
        }
        DealDeskError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        DealDeskError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        DealDeskError::Wallet(WalletError::InsufficientCredits { .. }) => StatusCode::CONFLICT,
        DealDeskError::Wallet(WalletError::UnknownClient) => StatusCode::NOT_FOUND,
        DealDeskError::Repository(RepositoryError::Unavailable(_))
        | DealDeskError::Wallet(WalletError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
