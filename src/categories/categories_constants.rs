use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::categories_model::{BillingMode, CategorySeed};

/// Billing modes
///
/// Exactly one mode applies to a category. Freeform categories have their
/// fee supplied externally and carry no derived validity period.
pub const BILLING_MODE_YEARLY: &str = "YEARLY";
pub const BILLING_MODE_MONTHLY: &str = "MONTHLY";
pub const BILLING_MODE_DAILY: &str = "DAILY";
pub const BILLING_MODE_FREEFORM: &str = "FREEFORM";

const ZERO: Decimal = dec!(0);

/// Default permit-category catalog, applied idempotently at bootstrap
/// (create-or-update by name).
pub const DEFAULT_PERMIT_CATALOG: [CategorySeed; 9] = [
    CategorySeed {
        name: "Large Business",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(40000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "Small Business",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(12000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "Market Stall",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(17000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "Hawking",
        billing_mode: BillingMode::Monthly,
        registration_fee: ZERO,
        annual_fee: ZERO,
        monthly_fee: dec!(200),
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "Alcohol On-Sale",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(27000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "Alcohol Off-Sale",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(17000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "Alcohol Special Event",
        billing_mode: BillingMode::Daily,
        registration_fee: ZERO,
        annual_fee: ZERO,
        monthly_fee: ZERO,
        daily_fee: dec!(3000),
    },
    CategorySeed {
        name: "Night Club / Lounge",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(37000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
    CategorySeed {
        name: "PSV",
        billing_mode: BillingMode::Yearly,
        registration_fee: dec!(3000),
        annual_fee: dec!(10000),
        monthly_fee: ZERO,
        daily_fee: ZERO,
    },
];
