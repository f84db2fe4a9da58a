use std::sync::Arc;

use actix_web::{Responder, get, put, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use db::dtos::user::ProfileUpdate;
use sqlx::PgPool;

use crate::dtos::auth::{ProfileResponse, ProfileUpdateResponse, UpdateProfileRequest};
use crate::services;

/// Endpoint to retrieve the current authenticated user's profile.
///
/// Returns the user record without the password hash or verification token,
/// plus the subscription sub-document and payment history.
#[get("/user/profile")]
pub async fn get_profile(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::user::get_user_by_id(pg_pool, claims.user_id).await?;
    let payments = db::payment::get_payments_by_user(pg_pool, user.id).await?;
    Success::ok(ProfileResponse::new(user, payments))
}

/// Partial profile update; only the fields present in the payload change.
///
/// # Input
/// - `req`: JSON payload with optional name, phone, address and bio
///
/// # Output
/// - Success: Returns the updated profile
/// - Error: 401 without a valid token, 404 if the account no longer exists
#[put("/user/profile")]
pub async fn put_profile(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<UpdateProfileRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    let user = services::user::update_profile(
        pg_pool,
        claims.user_id,
        ProfileUpdate {
            name: req.name,
            phone: req.phone,
            address: req.address,
            bio: req.bio,
        },
    )
    .await?;
    let payments = db::payment::get_payments_by_user(pg_pool, user.id).await?;
    Success::ok(ProfileUpdateResponse {
        message: "Profile updated successfully".to_string(),
        user: ProfileResponse::new(user, payments),
    })
}
