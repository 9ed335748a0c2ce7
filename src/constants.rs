use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Vehicle types
///
/// Each constant is one of the supported vehicle categories a parking
/// ticket can be issued for. The values are stored as-is on vehicles and
/// on ticket snapshots.
pub const VEHICLE_TYPE_SALOON: &str = "saloon";
pub const VEHICLE_TYPE_VAN: &str = "van";
pub const VEHICLE_TYPE_BUS_LORRY: &str = "bus_lorry";
pub const VEHICLE_TYPE_TRUCK_TANKER: &str = "truck_tanker";

/// All supported vehicle types
pub const VEHICLE_TYPES: [&str; 4] = [
    VEHICLE_TYPE_SALOON,
    VEHICLE_TYPE_VAN,
    VEHICLE_TYPE_BUS_LORRY,
    VEHICLE_TYPE_TRUCK_TANKER,
];

/// Hourly parking rates per vehicle type. The rate is an hourly rate:
/// it is scaled down for minute-billed tickets and up for day-billed ones.
pub const PARKING_RATE_SALOON: Decimal = dec!(60);
pub const PARKING_RATE_VAN: Decimal = dec!(100);
pub const PARKING_RATE_BUS_LORRY: Decimal = dec!(140);
pub const PARKING_RATE_TRUCK_TANKER: Decimal = dec!(180);

/// Time units for parking tickets
pub const TIME_UNIT_MINUTES: &str = "minutes";
pub const TIME_UNIT_HOURS: &str = "hours";
pub const TIME_UNIT_DAYS: &str = "days";

/// Ceiling for the fee of a monthly-billed permit, whatever its duration.
pub const MONTHLY_FEE_CAP: Decimal = dec!(2400);

/// Monthly-billed permits approximate a month as a fixed 30 days when
/// deriving the validity period.
pub const DAYS_PER_BILLING_MONTH: i64 = 30;

/// Scale (decimal places) of monetary amounts at rest.
pub const MONEY_SCALE: u32 = 2;
