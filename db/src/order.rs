use common::{
    billing::OrderStatus,
    error::{AppError, Res},
};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::order::{OrderUpsert, PaymentReference},
    models::order::Order,
};

/// Creates the user's pending order or overwrites its package selection if
/// one already exists. Conflicts on the partial unique index over
/// `(user_id) WHERE status = 'pending'`, which is what keeps the
/// one-pending-order invariant without an explicit lock.
pub async fn upsert_pending_order<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: OrderUpsert,
) -> Res<Order> {
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (user_id, company_id, package_name, package_price,
                            package_duration_value, package_duration_unit, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'pending')
        ON CONFLICT (user_id) WHERE status = 'pending' DO UPDATE
        SET company_id             = EXCLUDED.company_id,
            package_name           = EXCLUDED.package_name,
            package_price          = EXCLUDED.package_price,
            package_duration_value = EXCLUDED.package_duration_value,
            package_duration_unit  = EXCLUDED.package_duration_unit,
            updated_at             = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(data.company_id)
    .bind(data.package_name)
    .bind(data.package_price)
    .bind(data.package_duration_value)
    .bind(data.package_duration_unit)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Fetches an order only when it belongs to the given user; a foreign
/// order behaves exactly like a missing one.
pub async fn get_order_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
    user_id: Uuid,
) -> Res<Option<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Moves a pending order to paid and records the payment reference. The
/// `status = 'pending'` guard makes the transition a single atomic
/// compare-and-set; returns `None` when the order already left pending.
pub async fn mark_order_paid<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
    reference: PaymentReference,
) -> Res<Option<Order>> {
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET status                 = 'paid',
            payment_method         = $2,
            payment_payer_number   = $3,
            payment_transaction_id = $4,
            payment_verified_at    = now(),
            updated_at             = now()
        WHERE id = $1 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(reference.method)
    .bind(reference.payer_number)
    .bind(reference.transaction_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Applies a status change to a still-pending order; transition legality is
/// checked by the caller against `OrderStatus::can_transition`.
pub async fn update_order_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
    status: OrderStatus,
) -> Res<Option<Order>> {
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET status = $2, updated_at = now()
        WHERE id = $1 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(status)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
