use crate::errors::Result;

use super::parking_model::{
    Area, NewArea, NewParkingSection, NewParkingTicket, NewTown, ParkingSection, ParkingTicket,
    ParkingTicketDB, SectionContext, Town, Vehicle,
};

/// Trait defining the contract for parking repository operations.
pub trait ParkingRepositoryTrait: Send + Sync {
    fn get_towns(&self) -> Result<Vec<Town>>;
    fn create_town(&self, new_town: NewTown) -> Result<Town>;
    fn get_areas(&self, town_id: &str) -> Result<Vec<Area>>;
    fn create_area(&self, new_area: NewArea) -> Result<Area>;
    fn get_sections(&self, area_id: &str) -> Result<Vec<ParkingSection>>;
    fn create_section(&self, new_section: NewParkingSection) -> Result<ParkingSection>;
    fn get_section_context(&self, section_id: &str) -> Result<SectionContext>;

    /// Atomic find-or-insert keyed by the `(owner_id, plate_number)`
    /// uniqueness constraint. `vehicle_type` is only consulted when the
    /// vehicle does not exist yet.
    fn get_or_create_vehicle(
        &self,
        owner_id: &str,
        plate_number: &str,
        vehicle_type: Option<&str>,
    ) -> Result<Vehicle>;

    /// Atomic find-or-insert of a custom section keyed by the
    /// `(area_id, name)` uniqueness constraint.
    fn get_or_create_custom_section(&self, area_id: &str, name: &str) -> Result<SectionContext>;

    fn insert_ticket(&self, ticket: ParkingTicketDB) -> Result<ParkingTicket>;
    fn get_ticket(&self, ticket_id: &str) -> Result<ParkingTicket>;
    fn get_tickets_by_owner(&self, owner_id: &str) -> Result<Vec<ParkingTicket>>;
}

/// Trait defining the contract for parking service operations.
pub trait ParkingServiceTrait: Send + Sync {
    fn get_towns(&self) -> Result<Vec<Town>>;
    fn create_town(&self, new_town: NewTown) -> Result<Town>;
    fn get_areas(&self, town_id: &str) -> Result<Vec<Area>>;
    fn create_area(&self, new_area: NewArea) -> Result<Area>;
    fn get_sections(&self, area_id: &str) -> Result<Vec<ParkingSection>>;
    fn create_section(&self, new_section: NewParkingSection) -> Result<ParkingSection>;
    fn create_ticket(&self, new_ticket: NewParkingTicket) -> Result<ParkingTicket>;
    fn get_ticket(&self, ticket_id: &str) -> Result<ParkingTicket>;
    fn get_tickets_by_owner(&self, owner_id: &str) -> Result<Vec<ParkingTicket>>;
}
