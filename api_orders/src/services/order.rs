use api_subs::services::sub::{self, Activation};
use common::{
    billing::OrderStatus,
    error::{AppError, Res},
};
use db::{
    dtos::{
        company::CompanyUpsert,
        order::{OrderUpsert, PaymentReference},
    },
    models::{company::Company, order::Order},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::order::{CheckoutDetailsRequest, VerifyPaymentRequest};

const PAYMENT_METHOD: &str = "bkash";

/// Checks a checkout submission against the canonical catalog and returns
/// the unit price. Client-supplied prices are never trusted.
pub fn validate_checkout(req: &CheckoutDetailsRequest) -> Res<i64> {
    if req.company_name.trim().is_empty() || req.company_address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Company name, address, package details, and duration are required".to_string(),
        ));
    }
    if req.package_duration_value < 1 {
        return Err(AppError::BadRequest(
            "Package duration must be at least one unit".to_string(),
        ));
    }

    let unit_price = req
        .package_name
        .unit_price(req.package_duration_unit)
        .ok_or_else(|| AppError::BadRequest("Package is not in the catalog".to_string()))?;

    if req.package_price != unit_price {
        return Err(AppError::BadRequest(
            "Package price does not match the catalog".to_string(),
        ));
    }
    if req.total_amount != unit_price * req.package_duration_value as i64 {
        return Err(AppError::BadRequest(
            "Total amount does not match the package price".to_string(),
        ));
    }

    Ok(unit_price)
}

/// Persists the checkout submission: refreshes the caller's company record,
/// then creates or overwrites their pending order. The two writes are
/// individually atomic upserts; there is no transaction spanning both.
pub async fn submit_checkout(
    pool: &PgPool,
    user_id: Uuid,
    req: CheckoutDetailsRequest,
) -> Res<(Company, Order)> {
    let unit_price = validate_checkout(&req)?;

    let company = db::company::upsert_company(
        pool,
        user_id,
        CompanyUpsert {
            company_name: req.company_name,
            company_address: req.company_address,
            company_phone: req.company_phone,
            company_email: req.company_email,
            tax_id: req.tax_id,
        },
    )
    .await?;

    let order = db::order::upsert_pending_order(
        pool,
        user_id,
        OrderUpsert {
            company_id: company.id,
            package_name: req.package_name,
            package_price: unit_price,
            package_duration_value: req.package_duration_value,
            package_duration_unit: req.package_duration_unit,
        },
    )
    .await?;

    Ok((company, order))
}

/// Structural checks on the submitted payment reference. A real gateway
/// call would slot in here; the reference itself is all we can verify.
pub fn validate_payment_reference(payer_number: &str, transaction_id: &str) -> Res<()> {
    if payer_number.trim().is_empty() || transaction_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Payer number and transaction id are required".to_string(),
        ));
    }
    Ok(())
}

/// Confirms payment of a pending order and activates the owner's
/// subscription for the purchased window.
pub async fn verify_payment(
    pool: &PgPool,
    user_id: Uuid,
    req: VerifyPaymentRequest,
) -> Res<Order> {
    validate_payment_reference(&req.payer_number, &req.transaction_id)?;

    let order = db::order::get_order_for_user(pool, req.order_id, user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Order not found or does not belong to the user".to_string())
        })?;

    if !order.status.can_transition(OrderStatus::Paid) {
        return Err(AppError::BadRequest(
            "Order is not awaiting payment".to_string(),
        ));
    }
    if db::payment::exists_transaction_id(pool, &req.transaction_id).await? {
        return Err(AppError::BadRequest(
            "Transaction id has already been used".to_string(),
        ));
    }

    let order = db::order::mark_order_paid(
        pool,
        order.id,
        PaymentReference {
            method: PAYMENT_METHOD.to_string(),
            payer_number: req.payer_number,
            transaction_id: req.transaction_id.clone(),
        },
    )
    .await?
    .ok_or_else(|| AppError::BadRequest("Order is not awaiting payment".to_string()))?;

    // the payment record carries the total actually paid, not the unit price
    let total = order.package_price * order.package_duration_value as i64;
    sub::activate_subscription(
        pool,
        user_id,
        Activation {
            plan: order.package_name,
            duration_value: order.package_duration_value,
            duration_unit: order.package_duration_unit,
            price: total,
            auto_renew: false,
            transaction_id: Some(req.transaction_id),
            originating_order: Some(order.id),
        },
    )
    .await?;

    Ok(order)
}

/// Applies a caller-requested status change, restricted to the legal
/// transitions out of pending.
pub async fn update_status(
    pool: &PgPool,
    user_id: Uuid,
    order_id: Uuid,
    status: OrderStatus,
) -> Res<Order> {
    let order = db::order::get_order_for_user(pool, order_id, user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Order not found or does not belong to the user".to_string())
        })?;

    if !order.status.can_transition(status) {
        return Err(AppError::BadRequest(format!(
            "Cannot move order from {} to {}",
            order.status, status
        )));
    }

    db::order::update_order_status(pool, order.id, status)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Cannot move order from {} to {}", order.status, status))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::billing::{DurationUnit, SubscriptionPlan};

    fn checkout_request() -> CheckoutDetailsRequest {
        CheckoutDetailsRequest {
            company_name: "Acme".to_string(),
            company_address: "1 Rd".to_string(),
            company_phone: None,
            company_email: None,
            tax_id: None,
            package_name: SubscriptionPlan::Professional,
            package_price: 999,
            package_duration_value: 3,
            package_duration_unit: DurationUnit::Month,
            total_amount: 2997,
        }
    }

    #[test]
    fn valid_checkout_passes() {
        assert_eq!(validate_checkout(&checkout_request()).unwrap(), 999);
    }

    #[test]
    fn blank_company_fields_are_rejected() {
        let mut req = checkout_request();
        req.company_name = "  ".to_string();
        assert!(validate_checkout(&req).is_err());

        let mut req = checkout_request();
        req.company_address = String::new();
        assert!(validate_checkout(&req).is_err());
    }

    #[test]
    fn price_must_match_catalog() {
        let mut req = checkout_request();
        req.package_price = 1;
        assert!(validate_checkout(&req).is_err());
    }

    #[test]
    fn total_must_match_price_times_duration() {
        let mut req = checkout_request();
        req.total_amount = 999;
        assert!(validate_checkout(&req).is_err());
    }

    #[test]
    fn yearly_checkout_uses_yearly_unit_price() {
        let mut req = checkout_request();
        req.package_duration_value = 1;
        req.package_duration_unit = DurationUnit::Year;
        req.package_price = 999 * 12;
        req.total_amount = 999 * 12;
        assert_eq!(validate_checkout(&req).unwrap(), 999 * 12);
    }

    #[test]
    fn plan_none_is_not_sellable() {
        let mut req = checkout_request();
        req.package_name = SubscriptionPlan::None;
        assert!(validate_checkout(&req).is_err());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut req = checkout_request();
        req.package_duration_value = 0;
        assert!(validate_checkout(&req).is_err());
    }

    #[test]
    fn empty_payment_reference_is_rejected() {
        assert!(validate_payment_reference("", "TXN1").is_err());
        assert!(validate_payment_reference("0171000000", " ").is_err());
        assert!(validate_payment_reference("0171000000", "TXN1").is_ok());
    }
}
