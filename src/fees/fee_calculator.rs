use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::categories::{BillingMode, PermitCategory};
use crate::constants::*;

/// Hourly parking rate for a vehicle type. Unknown types map to zero;
/// this is the documented policy for snapshots carrying retired type
/// names, not a validation fallback.
pub fn vehicle_hourly_rate(vehicle_type: &str) -> Decimal {
    match vehicle_type {
        VEHICLE_TYPE_SALOON => PARKING_RATE_SALOON,
        VEHICLE_TYPE_VAN => PARKING_RATE_VAN,
        VEHICLE_TYPE_BUS_LORRY => PARKING_RATE_BUS_LORRY,
        VEHICLE_TYPE_TRUCK_TANKER => PARKING_RATE_TRUCK_TANKER,
        _ => Decimal::ZERO,
    }
}

/// Total fee for a permit, derived from the category's billing mode.
///
/// - Yearly: registration fee plus a pro-rated share of the annual fee,
///   counting the start month as remaining.
/// - Monthly: monthly fee times the duration, capped at MONTHLY_FEE_CAP.
/// - Daily: daily fee times the duration.
/// - Freeform: zero; the fee is supplied externally.
pub fn calculate_permit_fee(
    category: &PermitCategory,
    start_date: NaiveDate,
    duration_days: Option<i32>,
    duration_months: Option<i32>,
) -> Decimal {
    match category.billing_mode {
        BillingMode::Yearly => {
            let remaining_months = Decimal::from(12 - start_date.month() + 1);
            let monthly_portion = category.annual_fee / Decimal::from(12);
            category.registration_fee + monthly_portion * remaining_months
        }
        BillingMode::Monthly => {
            let months = duration_months.unwrap_or(1).max(1);
            let fee = category.monthly_fee * Decimal::from(months);
            fee.min(MONTHLY_FEE_CAP)
        }
        BillingMode::Daily => {
            let days = duration_days.unwrap_or(1).max(1);
            category.daily_fee * Decimal::from(days)
        }
        BillingMode::Freeform => Decimal::ZERO,
    }
}

/// Amount due for a parking ticket.
///
/// The vehicle rate is an hourly rate: minute-billed tickets scale it down
/// by 60, day-billed tickets scale it up by 24. Unknown vehicle types and
/// unknown time units yield zero. The result carries exactly two decimal
/// places, rounded half-up.
pub fn calculate_ticket_amount(vehicle_type: &str, duration: i32, time_unit: &str) -> Decimal {
    let rate = vehicle_hourly_rate(vehicle_type);
    let duration = Decimal::from(duration);

    let amount = match time_unit {
        TIME_UNIT_MINUTES => rate / Decimal::from(60) * duration,
        TIME_UNIT_HOURS => rate * duration,
        TIME_UNIT_DAYS => rate * Decimal::from(24) * duration,
        _ => Decimal::ZERO,
    };

    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::categories::BillingMode;

    fn category(billing_mode: BillingMode) -> PermitCategory {
        let now = Utc::now().naive_utc();
        PermitCategory {
            id: "cat-1".to_string(),
            name: "Test Category".to_string(),
            billing_mode,
            registration_fee: dec!(3000),
            annual_fee: dec!(12000),
            monthly_fee: dec!(200),
            daily_fee: dec!(3000),
            created_at: now,
            updated_at: now,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn yearly_fee_prorates_by_remaining_months() {
        let cat = category(BillingMode::Yearly);
        // January start: all 12 months remain.
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 1, 15), None, None),
            dec!(15000)
        );
        // July start: 6 months remain, 3000 + 1000 * 6.
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 7, 1), None, None),
            dec!(9000)
        );
        // December start: the start month still counts.
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 12, 31), None, None),
            dec!(4000)
        );
    }

    #[test]
    fn monthly_fee_is_capped() {
        let cat = category(BillingMode::Monthly);
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 3, 1), None, Some(3)),
            dec!(600)
        );
        // Hawking scenario: 200 * 20 = 4000, capped at 2400.
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 3, 1), None, Some(20)),
            dec!(2400)
        );
    }

    #[test]
    fn monthly_fee_is_monotone_until_cap() {
        let cat = category(BillingMode::Monthly);
        let mut previous = Decimal::ZERO;
        for months in 1..=30 {
            let fee = calculate_permit_fee(&cat, date(2024, 1, 1), None, Some(months));
            assert!(fee >= previous);
            assert!(fee <= dec!(2400));
            previous = fee;
        }
    }

    #[test]
    fn monthly_fee_defaults_missing_duration_to_one() {
        let cat = category(BillingMode::Monthly);
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 3, 1), None, None),
            dec!(200)
        );
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 3, 1), None, Some(0)),
            dec!(200)
        );
    }

    #[test]
    fn daily_fee_is_exact_product() {
        let cat = category(BillingMode::Daily);
        // Alcohol Special Event scenario.
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 6, 10), Some(2), None),
            dec!(6000)
        );
        for days in 1..=10 {
            assert_eq!(
                calculate_permit_fee(&cat, date(2024, 6, 10), Some(days), None),
                dec!(3000) * Decimal::from(days)
            );
        }
    }

    #[test]
    fn freeform_fee_is_zero() {
        let cat = category(BillingMode::Freeform);
        assert_eq!(
            calculate_permit_fee(&cat, date(2024, 6, 10), None, None),
            Decimal::ZERO
        );
    }

    #[test]
    fn ticket_amount_per_time_unit() {
        // 60 / 60 * 1 minute = 1.00
        assert_eq!(
            calculate_ticket_amount(VEHICLE_TYPE_SALOON, 1, TIME_UNIT_MINUTES),
            dec!(1.00)
        );
        // truck_tanker scenario: 180 * 3 hours = 540.00
        assert_eq!(
            calculate_ticket_amount(VEHICLE_TYPE_TRUCK_TANKER, 3, TIME_UNIT_HOURS),
            dec!(540.00)
        );
        // 100 * 24 * 2 days = 4800.00
        assert_eq!(
            calculate_ticket_amount(VEHICLE_TYPE_VAN, 2, TIME_UNIT_DAYS),
            dec!(4800.00)
        );
    }

    #[test]
    fn ticket_amount_rounds_half_up_to_two_places() {
        // 100 / 60 = 1.666... rounds to 1.67
        assert_eq!(
            calculate_ticket_amount(VEHICLE_TYPE_VAN, 1, TIME_UNIT_MINUTES),
            dec!(1.67)
        );
        // 140 / 60 * 7 = 16.333... rounds to 16.33
        assert_eq!(
            calculate_ticket_amount(VEHICLE_TYPE_BUS_LORRY, 7, TIME_UNIT_MINUTES),
            dec!(16.33)
        );
        let amount = calculate_ticket_amount(VEHICLE_TYPE_BUS_LORRY, 7, TIME_UNIT_MINUTES);
        assert_eq!(amount.scale(), 2);
    }

    #[test]
    fn unknown_vehicle_type_and_unit_yield_zero() {
        assert_eq!(
            calculate_ticket_amount("motorbike", 5, TIME_UNIT_HOURS),
            Decimal::ZERO
        );
        assert_eq!(
            calculate_ticket_amount(VEHICLE_TYPE_SALOON, 5, "weeks"),
            Decimal::ZERO
        );
    }
}
