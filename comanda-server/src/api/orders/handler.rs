//! Order API Handlers

use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::models::{CartSubmit, Order};
use shared::ticket::{KitchenTicket, TicketItemInput, TicketStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::tickets::Bill;
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    /// Only orders not yet settled or cancelled
    #[serde(default)]
    pub open: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<KitchenTicket>,
}

/// POST /api/orders - submit a cart
pub async fn submit(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CartSubmit>,
) -> AppResult<impl IntoResponse> {
    let (order, ticket) = state
        .order_service()
        .submit_cart(&user.restaurant_id, payload)?;
    Ok(ok(SubmitResponse { order, ticket }))
}

/// GET /api/orders - newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OrderQuery>,
) -> AppResult<impl IntoResponse> {
    let repo = state.orders();
    let orders = if query.open {
        repo.find_open(&user.restaurant_id)?
    } else {
        repo.find_all(&user.restaurant_id, query.limit)?
    };
    Ok(ok(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state, &user, &id)?;
    Ok(ok(order))
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemsRequest {
    pub items: Vec<TicketItemInput>,
}

/// PUT /api/orders/{id}/items - amend an order the kitchen has not started
pub async fn update_items(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItemsRequest>,
) -> AppResult<impl IntoResponse> {
    let order = state
        .order_service()
        .update_items(&user.restaurant_id, &id, payload.items)?;
    Ok(ok(order))
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub order_id: String,
    pub bill: Bill,
    pub receipt: String,
}

/// GET /api/orders/{id}/bill - compose without settling
pub async fn bill(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state, &user, &id)?;
    let bill = state.order_service().preview_bill(&order);
    let receipt = bill.render_receipt(&order.label);
    Ok(ok(BillResponse {
        order_id: order.id,
        bill,
        receipt,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub payment_method: String,
}

#[derive(Debug, Serialize)]
pub struct SettleResponse {
    pub order: Order,
    pub bill: Bill,
}

/// POST /api/orders/{id}/settle - complete the ticket and record payment
pub async fn settle(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<SettleRequest>,
) -> AppResult<impl IntoResponse> {
    if payload.payment_method.trim().is_empty() {
        return Err(AppError::validation("payment_method must not be empty"));
    }
    let actor = user.actor_for(TicketStatus::Completed);
    let (order, bill) = state.order_service().settle(
        &user.restaurant_id,
        &id,
        payload.payment_method,
        &actor,
    )?;
    Ok(ok(SettleResponse { order, bill }))
}

/// POST /api/orders/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let actor = user.actor_for(TicketStatus::Cancelled);
    let order = state
        .order_service()
        .cancel(&user.restaurant_id, &id, &actor)?;
    Ok(ok(order))
}

fn find_order(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<Order> {
    Ok(state
        .orders()
        .find_by_id(&user.restaurant_id, id)?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?)
}
