use common::billing::{DurationUnit, OrderStatus, SubscriptionPlan};
use db::models::{
    company::Company,
    order::{Order, PaymentDetails},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetailsRequest {
    pub company_name: String,
    pub company_address: String,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub tax_id: Option<String>,
    pub package_name: SubscriptionPlan,
    pub package_price: i64,
    pub package_duration_value: i32,
    pub package_duration_unit: DurationUnit,
    pub total_amount: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetailsResponse {
    pub message: String,
    pub company_id: Uuid,
    pub order_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: Uuid,
    pub payer_number: String,
    pub transaction_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_id: Uuid,
    pub status: OrderStatus,
}

/// Order as returned by the API: the record plus its payment details once
/// the order has been paid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
}

impl From<Order> for OrderPayload {
    fn from(order: Order) -> Self {
        let payment_details = order.payment_details();
        OrderPayload {
            order,
            payment_details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderActionResponse {
    pub message: String,
    pub order: OrderPayload,
}

/// Single-order view with the linked company record populated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderPayload,
    pub company: Option<Company>,
}
