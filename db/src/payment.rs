use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::payment::PaymentCreateRequest, models::payment::PaymentRecord};

pub async fn insert_payment<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PaymentCreateRequest,
) -> Res<PaymentRecord> {
    sqlx::query_as::<_, PaymentRecord>(
        r#"
        INSERT INTO payment_records (user_id, amount, currency, status, plan, transaction_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.amount)
    .bind(data.currency)
    .bind(data.status)
    .bind(data.plan)
    .bind(data.transaction_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_payments_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<PaymentRecord>> {
    sqlx::query_as::<_, PaymentRecord>(
        "SELECT * FROM payment_records WHERE user_id = $1 ORDER BY date",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn exists_transaction_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    transaction_id: &str,
) -> Res<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM payment_records WHERE transaction_id = $1)")
        .bind(transaction_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
