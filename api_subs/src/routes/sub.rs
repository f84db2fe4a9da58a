use std::sync::Arc;

use actix_web::{Responder, post, put, web};
use common::{
    billing::DurationUnit,
    error::{AppError, Res},
    http::Success,
    jwt::JwtClaims,
};
use sqlx::PgPool;

use crate::{
    dtos::sub::{SubscriptionCancelResponse, SubscriptionUpdateResponse, UpdateSubscriptionRequest},
    services::{self, sub::Activation},
};

/// Activates a plan directly from the dashboard, without going through
/// checkout. Fixed 30-day window, price from the catalog.
///
/// # Input
/// - `req`: JSON payload with the plan name and the autoRenew flag
///
/// # Output
/// - Success: Returns the new subscription and the appended payment record
/// - Error: 400 for the `none` plan, 401/404 for auth and missing users
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/user/subscription', {
///   method: 'PUT',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({ plan: 'Professional', autoRenew: true })
/// });
///
/// if (response.ok) {
///   const data = await response.json();
///   console.log('Subscription:', data.subscription);
///   console.log('Payment:', data.payment);
/// }
/// ```
#[put("/user/subscription")]
pub async fn put_subscription(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<UpdateSubscriptionRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let price = req
        .plan
        .monthly_price()
        .ok_or_else(|| AppError::BadRequest("Invalid subscription plan".to_string()))?;

    let (user, payment) = services::sub::activate_subscription(
        pg_pool,
        claims.user_id,
        Activation {
            plan: req.plan,
            duration_value: 1,
            duration_unit: DurationUnit::Month,
            price,
            auto_renew: req.auto_renew,
            transaction_id: None,
            originating_order: None,
        },
    )
    .await?;

    Success::ok(SubscriptionUpdateResponse {
        message: "Subscription updated successfully".to_string(),
        subscription: user.subscription(),
        payment,
    })
}

/// Cancels the current subscription. Idempotent; the entitlement window is
/// not shortened, only the status and auto-renew flag change.
#[post("/user/subscription/cancel")]
pub async fn post_cancel(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::sub::cancel_subscription(pg_pool, claims.user_id).await?;
    Success::ok(SubscriptionCancelResponse {
        message: "Subscription cancelled successfully".to_string(),
        subscription: user.subscription(),
    })
}
