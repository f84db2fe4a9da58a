use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{
    error::{AppError, Res},
    http::Success,
    jwt::JwtClaims,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::order::{
        OrderActionResponse, OrderDetailResponse, UpdateOrderStatusRequest, VerifyPaymentRequest,
    },
    services,
};

/// Fetches one of the caller's orders with the linked company populated.
/// An order owned by someone else is indistinguishable from a missing one.
#[get("/order/{order_id}")]
pub async fn get_order(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let order = db::order::get_order_for_user(pg_pool, path.into_inner(), claims.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Order not found or does not belong to the user".to_string())
        })?;

    let company = match order.company_id {
        Some(company_id) => db::company::get_company_by_id(pg_pool, company_id).await?,
        None => None,
    };

    Success::ok(OrderDetailResponse {
        order: order.into(),
        company,
    })
}

/// Confirms a bKash payment reference for a pending order.
///
/// On success the order moves to paid, the reference is recorded and the
/// caller's subscription is activated for the purchased window.
///
/// # Input
/// - `req`: JSON payload with the order id, payer number and transaction id
///
/// # Output
/// - Success: Returns the paid order with its payment details
/// - Error: 400 for a blank or already-used reference or an order that is
///   not pending, 404 when the order is missing or owned by someone else
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/verify-bkash-payment', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     orderId: sessionStorage.getItem('orderId'),
///     payerNumber: '01710000000',
///     transactionId: '8N7A5C2D1X'
///   })
/// });
///
/// if (response.ok) {
///   const data = await response.json();
///   console.log('Order paid:', data.order);
/// }
/// ```
#[post("/verify-bkash-payment")]
pub async fn post_verify_payment(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<VerifyPaymentRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let order =
        services::order::verify_payment(pg_pool, claims.user_id, req.into_inner()).await?;

    Success::ok(OrderActionResponse {
        message: "Payment verified successfully".to_string(),
        order: order.into(),
    })
}

/// Moves one of the caller's orders to a new status. Only the legal
/// transitions out of pending are accepted.
#[post("/update-order-status")]
pub async fn post_update_status(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<UpdateOrderStatusRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    let order =
        services::order::update_status(pg_pool, claims.user_id, req.order_id, req.status).await?;

    Success::ok(OrderActionResponse {
        message: "Order status updated successfully".to_string(),
        order: order.into(),
    })
}
