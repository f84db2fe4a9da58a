use db::models::{payment::PaymentRecord, user::Subscription, user::User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: LoginUser,
}

/// The trimmed user object returned on login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_email_verified: bool,
}

impl From<&User> for LoginUser {
    fn from(user: &User) -> Self {
        LoginUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_email_verified: user.is_email_verified,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
}

/// Full profile payload: user fields plus the subscription sub-document and
/// the payment history, password hash and verification token excluded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub subscription: Subscription,
    pub payment_history: Vec<PaymentRecord>,
}

impl ProfileResponse {
    pub fn new(user: User, payment_history: Vec<PaymentRecord>) -> Self {
        let subscription = user.subscription();
        ProfileResponse {
            user,
            subscription,
            payment_history,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: ProfileResponse,
}
