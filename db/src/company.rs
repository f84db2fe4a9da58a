use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::company::CompanyUpsert, models::company::Company};

/// Create-or-refresh of the single company record a user owns. Later
/// submissions overwrite earlier ones; no history is kept.
pub async fn upsert_company<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: CompanyUpsert,
) -> Res<Company> {
    sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (user_id, company_name, company_address, company_phone, company_email, tax_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE
        SET company_name    = EXCLUDED.company_name,
            company_address = EXCLUDED.company_address,
            company_phone   = EXCLUDED.company_phone,
            company_email   = EXCLUDED.company_email,
            tax_id          = EXCLUDED.tax_id,
            updated_at      = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(data.company_name)
    .bind(data.company_address)
    .bind(data.company_phone)
    .bind(data.company_email)
    .bind(data.tax_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_company_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    company_id: Uuid,
) -> Res<Option<Company>> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}
