use chrono::NaiveDateTime;
use common::billing::{DurationUnit, OrderStatus, SubscriptionPlan};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Option<Uuid>,
    pub package_name: SubscriptionPlan,
    pub package_price: i64,
    pub package_duration_value: i32,
    pub package_duration_unit: DurationUnit,
    pub status: OrderStatus,
    #[serde(skip_serializing)]
    pub payment_method: Option<String>,
    #[serde(skip_serializing)]
    pub payment_payer_number: Option<String>,
    #[serde(skip_serializing)]
    pub payment_transaction_id: Option<String>,
    #[serde(skip_serializing)]
    pub payment_verified_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Payment details recorded when the order was paid, `None` while the
    /// order is still pending or was cancelled.
    pub fn payment_details(&self) -> Option<PaymentDetails> {
        Some(PaymentDetails {
            method: self.payment_method.clone()?,
            payer_number: self.payment_payer_number.clone()?,
            transaction_id: self.payment_transaction_id.clone()?,
            verified_at: self.payment_verified_at?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: String,
    pub payer_number: String,
    pub transaction_id: String,
    pub verified_at: NaiveDateTime,
}
