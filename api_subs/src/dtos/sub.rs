use common::billing::SubscriptionPlan;
use db::models::{payment::PaymentRecord, user::Subscription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub plan: SubscriptionPlan,
    #[serde(default)]
    pub auto_renew: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionUpdateResponse {
    pub message: String,
    pub subscription: Subscription,
    pub payment: PaymentRecord,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionCancelResponse {
    pub message: String,
    pub subscription: Subscription,
}
