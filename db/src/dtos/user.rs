use chrono::NaiveDateTime;
use common::billing::{SubscriptionPlan, SubscriptionStatus};
use uuid::Uuid;

pub struct UserCreateRequest {
    pub name: String,
    pub email: String,
    pub verification_token: String,
}

pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
}

pub struct SubscriptionUpdate {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub auto_renew: bool,
}

pub struct CredentialsCreateRequest {
    pub user_id: Uuid,
    pub password_hash: String,
}
