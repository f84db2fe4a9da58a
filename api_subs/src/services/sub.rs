use chrono::Utc;
use common::{
    billing::{self, DurationUnit, PaymentStatus, SubscriptionPlan, SubscriptionStatus},
    error::{AppError, Res},
};
use db::{
    dtos::{payment::PaymentCreateRequest, user::SubscriptionUpdate},
    models::{payment::PaymentRecord, user::User},
};
use sqlx::PgPool;
use uuid::Uuid;

/// Parameters of a subscription activation. Every path to an active
/// subscription goes through [`activate_subscription`] with one of these,
/// whether payment came through an order or the plan was set directly.
pub struct Activation {
    pub plan: SubscriptionPlan,
    pub duration_value: i32,
    pub duration_unit: DurationUnit,
    pub price: i64,
    pub auto_renew: bool,
    /// External payment reference; a synthetic id is generated when absent.
    pub transaction_id: Option<String>,
    /// The paid order that triggered this activation, if any.
    pub originating_order: Option<Uuid>,
}

/// Activates the user's subscription and appends the matching payment
/// record. The entitlement window starts now and runs for the purchased
/// duration (month = 30 days, year = 365 days, scaled by the value).
pub async fn activate_subscription(
    pool: &PgPool,
    user_id: Uuid,
    activation: Activation,
) -> Res<(User, PaymentRecord)> {
    let start_date = Utc::now().naive_utc();
    let end_date =
        start_date + billing::subscription_window(activation.duration_value, activation.duration_unit);

    let mut tx = pool.begin().await?;

    let user = db::user::update_subscription(
        &mut *tx,
        user_id,
        SubscriptionUpdate {
            plan: activation.plan,
            status: SubscriptionStatus::Active,
            start_date,
            end_date,
            auto_renew: activation.auto_renew,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let transaction_id = activation
        .transaction_id
        .unwrap_or_else(generate_transaction_id);

    let payment = db::payment::insert_payment(
        &mut *tx,
        PaymentCreateRequest {
            user_id,
            amount: activation.price,
            currency: "USD".to_string(),
            status: PaymentStatus::Success,
            plan: activation.plan,
            transaction_id,
        },
    )
    .await?;

    tx.commit().await?;

    log::info!(
        "Activated {} subscription for user {} until {} (order {:?})",
        activation.plan,
        user_id,
        end_date,
        activation.originating_order,
    );

    Ok((user, payment))
}

/// Sets the subscription inactive and turns auto-renew off. The end date is
/// left untouched, so a cancelled subscription may still show a future end
/// date. Calling this twice is a no-op the second time.
pub async fn cancel_subscription(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::deactivate_subscription(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn generate_transaction_id() -> String {
    format!("TXN{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_transaction_ids_carry_prefix_and_differ() {
        let a = generate_transaction_id();
        let b = generate_transaction_id();
        assert!(a.starts_with("TXN"));
        assert_ne!(a, b);
    }
}
