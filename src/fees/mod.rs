pub(crate) mod fee_calculator;
pub(crate) mod validity;

pub use fee_calculator::{calculate_permit_fee, calculate_ticket_amount, vehicle_hourly_rate};
pub use validity::{resolve_validity, ValidityPeriod};
