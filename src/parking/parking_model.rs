use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{Error, ValidationError};

/// Enum representing the supported vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VehicleType {
    Saloon,
    Van,
    BusLorry,
    TruckTanker,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Saloon => VEHICLE_TYPE_SALOON,
            VehicleType::Van => VEHICLE_TYPE_VAN,
            VehicleType::BusLorry => VEHICLE_TYPE_BUS_LORRY,
            VehicleType::TruckTanker => VEHICLE_TYPE_TRUCK_TANKER,
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == VEHICLE_TYPE_SALOON => Ok(VehicleType::Saloon),
            s if s == VEHICLE_TYPE_VAN => Ok(VehicleType::Van),
            s if s == VEHICLE_TYPE_BUS_LORRY => Ok(VehicleType::BusLorry),
            s if s == VEHICLE_TYPE_TRUCK_TANKER => Ok(VehicleType::TruckTanker),
            _ => Err(format!("Unknown vehicle type: {}", s)),
        }
    }
}

/// Enum representing the billing time units for parking tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => TIME_UNIT_MINUTES,
            TimeUnit::Hours => TIME_UNIT_HOURS,
            TimeUnit::Days => TIME_UNIT_DAYS,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == TIME_UNIT_MINUTES => Ok(TimeUnit::Minutes),
            s if s == TIME_UNIT_HOURS => Ok(TimeUnit::Hours),
            s if s == TIME_UNIT_DAYS => Ok(TimeUnit::Days),
            _ => Err(format!("Unknown time unit: {}", s)),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::towns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Town {
    pub id: String,
    pub name: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::towns)]
#[serde(rename_all = "camelCase")]
pub struct NewTown {
    pub id: Option<String>,
    pub name: String,
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::areas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub town_id: String,
    pub name: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::areas)]
#[serde(rename_all = "camelCase")]
pub struct NewArea {
    pub id: Option<String>,
    pub town_id: String,
    pub name: String,
}

/// A parking section inside an area. `is_custom` marks ad-hoc sections
/// created on the fly for tickets issued outside the original catalog.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::parking_sections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ParkingSection {
    pub id: String,
    pub area_id: String,
    pub name: String,
    pub capacity: i32,
    pub is_custom: bool,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::parking_sections)]
#[serde(rename_all = "camelCase")]
pub struct NewParkingSection {
    pub id: Option<String>,
    pub area_id: String,
    pub name: String,
    pub capacity: i32,
    pub is_custom: bool,
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub owner_id: String,
    pub plate_number: String,
    pub vehicle_type: String,
}

/// A section resolved together with its containing area and town, used
/// for the denormalized snapshot on tickets.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionContext {
    pub section: ParkingSection,
    pub area: Area,
    pub town: Town,
}

/// Domain model representing a parking ticket.
///
/// `plate_number`, `vehicle_type`, `town_name` and `area_name` are
/// snapshots taken at save time; they are not kept in sync with the
/// referenced rows afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingTicket {
    pub id: String,
    pub vehicle_id: String,
    pub section_id: String,
    pub custom_place: Option<String>,
    pub duration: i32,
    pub time_unit: String,
    pub amount: Decimal,
    pub paid: bool,
    pub plate_number: String,
    pub vehicle_type: String,
    pub town_name: Option<String>,
    pub area_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for parking tickets
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    AsChangeset,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::parking_tickets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ParkingTicketDB {
    pub id: String,
    pub vehicle_id: String,
    pub section_id: String,
    pub custom_place: Option<String>,
    pub duration: i32,
    pub time_unit: String,
    pub amount: String,
    pub paid: bool,
    pub plate_number: String,
    pub vehicle_type: String,
    pub town_name: Option<String>,
    pub area_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ParkingTicketDB> for ParkingTicket {
    type Error = Error;

    fn try_from(db: ParkingTicketDB) -> Result<Self, Self::Error> {
        Ok(ParkingTicket {
            id: db.id,
            vehicle_id: db.vehicle_id,
            section_id: db.section_id,
            custom_place: db.custom_place,
            duration: db.duration,
            time_unit: db.time_unit,
            amount: Decimal::from_str(&db.amount)?,
            paid: db.paid,
            plate_number: db.plate_number,
            vehicle_type: db.vehicle_type,
            town_name: db.town_name,
            area_name: db.area_name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Input model for creating a new parking ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParkingTicket {
    pub owner_id: String,
    pub plate_number: String,
    /// Required the first time a plate is registered; ignored in favour of
    /// the stored type for known vehicles.
    pub vehicle_type: Option<String>,
    pub section_id: Option<String>,
    /// Area to attach a custom place to when no catalog section applies.
    pub area_id: Option<String>,
    pub custom_place: Option<String>,
    pub duration: i32,
    pub time_unit: String,
}

impl NewParkingTicket {
    /// Validates the new ticket data
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.owner_id.trim().is_empty() {
            return Err(ValidationError::MissingField("ownerId".to_string()).into());
        }
        if self.plate_number.trim().is_empty() {
            return Err(ValidationError::MissingField("plateNumber".to_string()).into());
        }
        if self.duration < 1 {
            return Err(ValidationError::InvalidField {
                field: "duration".to_string(),
                message: "duration must be at least 1".to_string(),
            }
            .into());
        }
        TimeUnit::from_str(&self.time_unit).map_err(|message| ValidationError::InvalidField {
            field: "timeUnit".to_string(),
            message,
        })?;
        if let Some(vehicle_type) = self.vehicle_type.as_deref() {
            VehicleType::from_str(vehicle_type).map_err(|message| {
                ValidationError::InvalidField {
                    field: "vehicleType".to_string(),
                    message,
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ticket() -> NewParkingTicket {
        NewParkingTicket {
            owner_id: "user-1".to_string(),
            plate_number: "KCB 124B".to_string(),
            vehicle_type: Some(VEHICLE_TYPE_SALOON.to_string()),
            section_id: Some("section-1".to_string()),
            area_id: None,
            custom_place: None,
            duration: 2,
            time_unit: TIME_UNIT_HOURS.to_string(),
        }
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        assert!(new_ticket().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut ticket = new_ticket();
        ticket.duration = 0;
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_time_unit() {
        let mut ticket = new_ticket();
        ticket.time_unit = "weeks".to_string();
        let err = ticket.validate().unwrap_err();
        assert!(err.to_string().contains("timeUnit"));
    }

    #[test]
    fn validate_rejects_unknown_vehicle_type() {
        let mut ticket = new_ticket();
        ticket.vehicle_type = Some("motorbike".to_string());
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn vehicle_type_and_time_unit_round_trip() {
        for vehicle_type in VEHICLE_TYPES {
            let parsed = VehicleType::from_str(vehicle_type).unwrap();
            assert_eq!(parsed.as_str(), vehicle_type);
        }
        for unit in [TimeUnit::Minutes, TimeUnit::Hours, TimeUnit::Days] {
            assert_eq!(TimeUnit::from_str(unit.as_str()), Ok(unit));
        }
    }
}
