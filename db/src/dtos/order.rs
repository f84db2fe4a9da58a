use common::billing::{DurationUnit, SubscriptionPlan};
use uuid::Uuid;

pub struct OrderUpsert {
    pub company_id: Uuid,
    pub package_name: SubscriptionPlan,
    pub package_price: i64,
    pub package_duration_value: i32,
    pub package_duration_unit: DurationUnit,
}

/// External payment reference captured on the pending→paid transition.
pub struct PaymentReference {
    pub method: String,
    pub payer_number: String,
    pub transaction_id: String,
}
