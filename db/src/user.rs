use common::error::{AppError, Res};
use sqlx::{Executor, FromRow, Postgres, Row};
use uuid::Uuid;

use crate::{
    dtos::user::{CredentialsCreateRequest, ProfileUpdate, SubscriptionUpdate, UserCreateRequest},
    models::user::{AuthCredentials, User},
};

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, verification_token)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.email)
    .bind(data.verification_token)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_user_credentials<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CredentialsCreateRequest,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_credentials (user_id, password_hash)
        VALUES ($1, $2)
        "#,
    )
    .bind(data.user_id)
    .bind(data.password_hash)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_user_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<(User, AuthCredentials)>> {
    let row = sqlx::query(
        r#"
        SELECT u.*, ac.password_hash
        FROM users u
        JOIN auth_credentials ac ON u.id = ac.user_id
        WHERE u.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    match row {
        Some(row) => {
            let user = User::from_row(&row)?;
            let credentials = AuthCredentials {
                user_id: user.id,
                password_hash: row.try_get("password_hash")?,
            };
            Ok(Some((user, credentials)))
        }
        None => Ok(None),
    }
}

/// Flips the verification flag for the user holding this token and consumes
/// the token in the same statement.
pub async fn mark_email_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    token: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET is_email_verified = TRUE, verification_token = NULL
        WHERE verification_token = $1
        RETURNING *
        "#,
    )
    .bind(token)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Partial profile update; absent fields keep their stored value.
pub async fn update_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: ProfileUpdate,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name    = COALESCE($2, name),
            phone   = COALESCE($3, phone),
            address = COALESCE($4, address),
            bio     = COALESCE($5, bio)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(data.name)
    .bind(data.phone)
    .bind(data.address)
    .bind(data.bio)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: SubscriptionUpdate,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET subscription_plan       = $2,
            subscription_status     = $3,
            subscription_start_date = $4,
            subscription_end_date   = $5,
            subscription_auto_renew = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(data.plan)
    .bind(data.status)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.auto_renew)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Deactivates the subscription without touching the entitlement window.
/// Safe to call on an already-inactive subscription.
pub async fn deactivate_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET subscription_status     = 'inactive',
            subscription_auto_renew = FALSE
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
