use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{
    dtos::order::{CheckoutDetailsRequest, CheckoutDetailsResponse},
    services,
};

/// Saves the checkout details: company information and package selection.
///
/// Upserts the caller's company record, then creates (or overwrites) their
/// single pending order with the selected package. Resubmitting with a
/// different package replaces the previous selection.
///
/// # Input
/// - `req`: JSON payload with company fields, package name/price, duration
///   value/unit and the displayed total
///
/// # Output
/// - Success: Returns the company id and the pending order id
/// - Error: 400 when required fields are blank or the price/total disagree
///   with the catalog
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/checkout/details', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     companyName: 'Acme',
///     companyAddress: '1 Rd',
///     packageName: 'Professional',
///     packagePrice: 999,
///     packageDurationValue: 3,
///     packageDurationUnit: 'month',
///     totalAmount: 2997
///   })
/// });
///
/// if (response.ok) {
///   const data = await response.json();
///   // Keep the order id for the payment step
///   sessionStorage.setItem('orderId', data.orderId);
/// }
/// ```
#[post("/checkout/details")]
pub async fn post_checkout_details(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CheckoutDetailsRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (company, order) =
        services::order::submit_checkout(pg_pool, claims.user_id, req.into_inner()).await?;

    Success::ok(CheckoutDetailsResponse {
        message: "Details saved and order created/updated".to_string(),
        company_id: company.id,
        order_id: order.id,
    })
}
