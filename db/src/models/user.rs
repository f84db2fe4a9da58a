use chrono::NaiveDateTime;
use common::billing::{SubscriptionPlan, SubscriptionStatus};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub bio: String,
    pub is_email_verified: bool,
    // never leaves the server
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub subscription_plan: SubscriptionPlan,
    #[serde(skip_serializing)]
    pub subscription_status: SubscriptionStatus,
    #[serde(skip_serializing)]
    pub subscription_start_date: Option<NaiveDateTime>,
    #[serde(skip_serializing)]
    pub subscription_end_date: Option<NaiveDateTime>,
    #[serde(skip_serializing)]
    pub subscription_auto_renew: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    /// The subscription sub-document view of the flat columns.
    pub fn subscription(&self) -> Subscription {
        Subscription {
            plan: self.subscription_plan,
            status: self.subscription_status,
            start_date: self.subscription_start_date,
            end_date: self.subscription_end_date,
            auto_renew: self.subscription_auto_renew,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub auto_renew: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AuthCredentials {
    pub user_id: Uuid,
    pub password_hash: String,
}
