use common::billing::{PaymentStatus, SubscriptionPlan};
use uuid::Uuid;

pub struct PaymentCreateRequest {
    pub user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub plan: SubscriptionPlan,
    pub transaction_id: String,
}
