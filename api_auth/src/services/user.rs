use common::error::{AppError, Res};
use db::dtos::user::{CredentialsCreateRequest, ProfileUpdate, UserCreateRequest};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::auth::SignupRequest;
use crate::services::auth;

pub async fn exists_user_by_email(pool: &PgPool, email: &str) -> Res<bool> {
    db::user::exists_user_by_email(pool, email).await
}

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Inserts user record and credentials to the database.
/// The generated verification token is stored on the returned user; mail
/// dispatch happens after this commits.
pub async fn create_user_with_credentials(pool: &PgPool, req: &SignupRequest) -> Res<User> {
    let mut tx = pool.begin().await?;

    // random token for the verification link
    let verification_token = generate_verification_token();

    // insert user
    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            name: req.name.clone(),
            email: req.email.clone(),
            verification_token,
        },
    )
    .await?;

    // hash the password and insert credentials
    let password_hash = auth::hash_password(&req.password)?;
    db::user::insert_user_credentials(
        &mut *tx,
        CredentialsCreateRequest {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;

    tx.commit().await?;
    Ok(user)
}

pub async fn update_profile(pool: &PgPool, user_id: Uuid, data: ProfileUpdate) -> Res<User> {
    db::user::update_profile(pool, user_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn verify_email(pool: &PgPool, token: &str) -> Res<User> {
    db::user::mark_email_verified(pool, token)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid verification token".to_string()))
}

fn generate_verification_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_tokens_are_unique_and_url_safe() {
        let a = generate_verification_token();
        let b = generate_verification_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
