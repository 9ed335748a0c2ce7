use chrono::{Datelike, Duration, NaiveDate};

use crate::categories::BillingMode;
use crate::constants::DAYS_PER_BILLING_MONTH;

/// Resolved validity of a permit: the derived end date plus the duration
/// fields normalized to the billing mode (the inapplicable field is
/// cleared here, not just rejected at input validation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPeriod {
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub duration_months: Option<i32>,
}

/// Derives the validity period for a permit.
///
/// - Yearly permits expire on December 31 of the start year, whatever the
///   start month.
/// - Monthly permits run a fixed 30 days per month, inclusive of the
///   start date.
/// - Daily permits run the given number of days, inclusive of the start
///   date.
/// - Freeform permits carry no derived end date; the caller may supply
///   explicit bounds.
pub fn resolve_validity(
    mode: BillingMode,
    start_date: NaiveDate,
    duration_days: Option<i32>,
    duration_months: Option<i32>,
) -> ValidityPeriod {
    match mode {
        BillingMode::Yearly => ValidityPeriod {
            end_date: NaiveDate::from_ymd_opt(start_date.year(), 12, 31),
            duration_days: None,
            duration_months: None,
        },
        BillingMode::Monthly => {
            let months = duration_months.unwrap_or(1).max(1);
            let span = Duration::days(DAYS_PER_BILLING_MONTH * i64::from(months) - 1);
            ValidityPeriod {
                end_date: Some(start_date + span),
                duration_days: None,
                duration_months: Some(months),
            }
        }
        BillingMode::Daily => {
            let days = duration_days.unwrap_or(1).max(1);
            ValidityPeriod {
                end_date: Some(start_date + Duration::days(i64::from(days) - 1)),
                duration_days: Some(days),
                duration_months: None,
            }
        }
        BillingMode::Freeform => ValidityPeriod {
            end_date: None,
            duration_days: None,
            duration_months: None,
        },
    }
}
