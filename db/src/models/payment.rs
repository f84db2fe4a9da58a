use chrono::NaiveDateTime;
use common::billing::{PaymentStatus, SubscriptionPlan};
use serde::Serialize;
use uuid::Uuid;

/// One append-only billing-event entry in a user's payment history.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub date: NaiveDateTime,
    pub status: PaymentStatus,
    pub plan: SubscriptionPlan,
    pub transaction_id: String,
}
