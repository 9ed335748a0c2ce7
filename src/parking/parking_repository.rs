use std::sync::Arc;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::{areas, parking_sections, parking_tickets, towns, vehicles};

use super::parking_model::{
    Area, NewArea, NewParkingSection, NewTown, ParkingSection, ParkingTicket, ParkingTicketDB,
    SectionContext, Town, Vehicle,
};
use super::parking_traits::ParkingRepositoryTrait;

pub struct ParkingRepository {
    pool: Arc<DbPool>,
}

impl ParkingRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ParkingRepository { pool }
    }

    fn load_context(
        conn: &mut crate::db::DbConnection,
        section: ParkingSection,
    ) -> Result<SectionContext> {
        let area = areas::table
            .find(&section.area_id)
            .first::<Area>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Area '{}'", section.area_id)))?;
        let town = towns::table
            .find(&area.town_id)
            .first::<Town>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Town '{}'", area.town_id)))?;
        Ok(SectionContext {
            section,
            area,
            town,
        })
    }
}

impl ParkingRepositoryTrait for ParkingRepository {
    fn get_towns(&self) -> Result<Vec<Town>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(towns::table.order(towns::name.asc()).load::<Town>(&mut conn)?)
    }

    fn create_town(&self, mut new_town: NewTown) -> Result<Town> {
        let mut conn = get_connection(&self.pool)?;
        new_town.id = Some(new_town.id.unwrap_or_else(|| Uuid::new_v4().to_string()));
        Ok(diesel::insert_into(towns::table)
            .values(&new_town)
            .returning(towns::all_columns)
            .get_result(&mut conn)?)
    }

    fn get_areas(&self, area_town_id: &str) -> Result<Vec<Area>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(areas::table
            .filter(areas::town_id.eq(area_town_id))
            .order(areas::name.asc())
            .load::<Area>(&mut conn)?)
    }

    fn create_area(&self, mut new_area: NewArea) -> Result<Area> {
        let mut conn = get_connection(&self.pool)?;
        new_area.id = Some(new_area.id.unwrap_or_else(|| Uuid::new_v4().to_string()));
        Ok(diesel::insert_into(areas::table)
            .values(&new_area)
            .returning(areas::all_columns)
            .get_result(&mut conn)?)
    }

    fn get_sections(&self, section_area_id: &str) -> Result<Vec<ParkingSection>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(parking_sections::table
            .filter(parking_sections::area_id.eq(section_area_id))
            .order(parking_sections::name.asc())
            .load::<ParkingSection>(&mut conn)?)
    }

    fn create_section(&self, mut new_section: NewParkingSection) -> Result<ParkingSection> {
        let mut conn = get_connection(&self.pool)?;
        new_section.id = Some(new_section.id.unwrap_or_else(|| Uuid::new_v4().to_string()));
        Ok(diesel::insert_into(parking_sections::table)
            .values(&new_section)
            .returning(parking_sections::all_columns)
            .get_result(&mut conn)?)
    }

    fn get_section_context(&self, section_id: &str) -> Result<SectionContext> {
        let mut conn = get_connection(&self.pool)?;
        let section = parking_sections::table
            .find(section_id)
            .first::<ParkingSection>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Parking section '{}'", section_id)))?;
        Self::load_context(&mut conn, section)
    }

    fn get_or_create_vehicle(
        &self,
        vehicle_owner_id: &str,
        plate: &str,
        vehicle_type: Option<&str>,
    ) -> Result<Vehicle> {
        let mut conn = get_connection(&self.pool)?;

        let existing = vehicles::table
            .filter(vehicles::owner_id.eq(vehicle_owner_id))
            .filter(vehicles::plate_number.eq(plate))
            .first::<Vehicle>(&mut conn)
            .optional()?;
        if let Some(vehicle) = existing {
            return Ok(vehicle);
        }

        // First registration of this plate: the type must be supplied.
        let vehicle_type = vehicle_type
            .ok_or_else(|| ValidationError::MissingField("vehicleType".to_string()))?;

        let row = Vehicle {
            id: Uuid::new_v4().to_string(),
            owner_id: vehicle_owner_id.to_string(),
            plate_number: plate.to_string(),
            vehicle_type: vehicle_type.to_string(),
        };

        match diesel::insert_into(vehicles::table)
            .values(&row)
            .returning(vehicles::all_columns)
            .get_result::<Vehicle>(&mut conn)
        {
            Ok(vehicle) => Ok(vehicle),
            // Lost a concurrent insert race; the winner's row is the one.
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(vehicles::table
                    .filter(vehicles::owner_id.eq(vehicle_owner_id))
                    .filter(vehicles::plate_number.eq(plate))
                    .first::<Vehicle>(&mut conn)?)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_or_create_custom_section(
        &self,
        section_area_id: &str,
        section_name: &str,
    ) -> Result<SectionContext> {
        let mut conn = get_connection(&self.pool)?;

        let existing = parking_sections::table
            .filter(parking_sections::area_id.eq(section_area_id))
            .filter(parking_sections::name.eq(section_name))
            .first::<ParkingSection>(&mut conn)
            .optional()?;
        if let Some(section) = existing {
            return Self::load_context(&mut conn, section);
        }

        // The area must exist before hanging a custom section off it.
        areas::table
            .find(section_area_id)
            .first::<Area>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Area '{}'", section_area_id)))?;

        let row = ParkingSection {
            id: Uuid::new_v4().to_string(),
            area_id: section_area_id.to_string(),
            name: section_name.to_string(),
            capacity: 1,
            is_custom: true,
        };

        let section = match diesel::insert_into(parking_sections::table)
            .values(&row)
            .returning(parking_sections::all_columns)
            .get_result::<ParkingSection>(&mut conn)
        {
            Ok(section) => section,
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                parking_sections::table
                    .filter(parking_sections::area_id.eq(section_area_id))
                    .filter(parking_sections::name.eq(section_name))
                    .first::<ParkingSection>(&mut conn)?
            }
            Err(err) => return Err(err.into()),
        };

        Self::load_context(&mut conn, section)
    }

    fn insert_ticket(&self, ticket: ParkingTicketDB) -> Result<ParkingTicket> {
        let mut conn = get_connection(&self.pool)?;
        let db_ticket = diesel::insert_into(parking_tickets::table)
            .values(&ticket)
            .returning(parking_tickets::all_columns)
            .get_result::<ParkingTicketDB>(&mut conn)?;
        ParkingTicket::try_from(db_ticket)
    }

    fn get_ticket(&self, ticket_id: &str) -> Result<ParkingTicket> {
        let mut conn = get_connection(&self.pool)?;
        let db_ticket = parking_tickets::table
            .find(ticket_id)
            .first::<ParkingTicketDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Parking ticket '{}'", ticket_id)))?;
        ParkingTicket::try_from(db_ticket)
    }

    fn get_tickets_by_owner(&self, ticket_owner_id: &str) -> Result<Vec<ParkingTicket>> {
        let mut conn = get_connection(&self.pool)?;
        parking_tickets::table
            .inner_join(vehicles::table)
            .filter(vehicles::owner_id.eq(ticket_owner_id))
            .select(parking_tickets::all_columns)
            .order(parking_tickets::created_at.desc())
            .load::<ParkingTicketDB>(&mut conn)?
            .into_iter()
            .map(ParkingTicket::try_from)
            .collect()
    }
}
