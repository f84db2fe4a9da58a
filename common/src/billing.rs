use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Subscription plans sold on the packages page. `None` is the default for
/// accounts that never purchased anything and is not a sellable package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_plan")]
pub enum SubscriptionPlan {
    #[serde(rename = "none")]
    #[sqlx(rename = "none")]
    None,
    Starter,
    Professional,
    Enterprise,
}

impl SubscriptionPlan {
    /// Canonical monthly price of a plan. Client-supplied prices are checked
    /// against this table before anything is persisted.
    pub fn monthly_price(&self) -> Option<i64> {
        match self {
            SubscriptionPlan::None => None,
            SubscriptionPlan::Starter => Some(499),
            SubscriptionPlan::Professional => Some(999),
            SubscriptionPlan::Enterprise => Some(1999),
        }
    }

    /// Price for one billing unit of the given duration unit.
    pub fn unit_price(&self, unit: DurationUnit) -> Option<i64> {
        let monthly = self.monthly_price()?;
        match unit {
            DurationUnit::Month => Some(monthly),
            DurationUnit::Year => Some(monthly * 12),
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubscriptionPlan::None => "none",
            SubscriptionPlan::Starter => "Starter",
            SubscriptionPlan::Professional => "Professional",
            SubscriptionPlan::Enterprise => "Enterprise",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Inactive,
    Active,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "duration_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Month,
    Year,
}

impl DurationUnit {
    /// Billing-day convention: a month is 30 days, a year 365.
    pub fn days(&self) -> i64 {
        match self {
            DurationUnit::Month => 30,
            DurationUnit::Year => 365,
        }
    }
}

/// Length of the entitlement window bought by `value` units.
pub fn subscription_window(value: i32, unit: DurationUnit) -> Duration {
    Duration::days(unit.days() * value as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Legal order transitions. Paid and cancelled are terminal; only a
    /// pending order may move anywhere.
    pub fn can_transition(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_months_is_ninety_days() {
        assert_eq!(subscription_window(3, DurationUnit::Month).num_days(), 90);
    }

    #[test]
    fn one_year_is_365_days() {
        assert_eq!(subscription_window(1, DurationUnit::Year).num_days(), 365);
    }

    #[test]
    fn catalog_prices_match_packages_page() {
        assert_eq!(SubscriptionPlan::Starter.monthly_price(), Some(499));
        assert_eq!(SubscriptionPlan::Professional.monthly_price(), Some(999));
        assert_eq!(SubscriptionPlan::Enterprise.monthly_price(), Some(1999));
        assert_eq!(SubscriptionPlan::None.monthly_price(), None);
    }

    #[test]
    fn yearly_unit_price_is_twelve_months() {
        assert_eq!(
            SubscriptionPlan::Professional.unit_price(DurationUnit::Year),
            Some(999 * 12)
        );
    }

    #[test]
    fn only_pending_orders_may_move() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Paid));
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Paid.can_transition(OrderStatus::Pending));
        assert!(!OrderStatus::Paid.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition(OrderStatus::Paid));
        assert!(!OrderStatus::Pending.can_transition(OrderStatus::Pending));
    }

    #[test]
    fn plan_names_serialize_like_the_packages_page() {
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::Professional).unwrap(),
            "\"Professional\""
        );
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::None).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::from_str::<DurationUnit>("\"month\"").unwrap(),
            DurationUnit::Month
        );
    }
}
