use std::sync::Arc;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};
use crate::fees::calculate_ticket_amount;

use super::parking_model::{
    Area, NewArea, NewParkingSection, NewParkingTicket, NewTown, ParkingSection, ParkingTicket,
    ParkingTicketDB, SectionContext, Town,
};
use super::parking_traits::{ParkingRepositoryTrait, ParkingServiceTrait};

/// Service orchestrating parking tickets and the town/area/section
/// catalog. Ticket amounts and snapshot fields are derived here, never
/// supplied by the caller.
pub struct ParkingService {
    parking_repository: Arc<dyn ParkingRepositoryTrait>,
}

impl ParkingService {
    pub fn new(parking_repository: Arc<dyn ParkingRepositoryTrait>) -> Self {
        Self { parking_repository }
    }

    /// Exactly one of {section id, custom place} must resolve to a
    /// concrete section.
    fn resolve_section(&self, new_ticket: &NewParkingTicket) -> Result<SectionContext> {
        if let Some(section_id) = new_ticket.section_id.as_deref() {
            return self.parking_repository.get_section_context(section_id);
        }

        if let Some(custom_place) = new_ticket.custom_place.as_deref() {
            let area_id = new_ticket.area_id.as_deref().ok_or_else(|| {
                ValidationError::MissingField("areaId".to_string())
            })?;
            return self
                .parking_repository
                .get_or_create_custom_section(area_id, custom_place.trim());
        }

        Err(ValidationError::InvalidInput(
            "select a section or provide a custom place (sectionId, customPlace)".to_string(),
        )
        .into())
    }
}

impl ParkingServiceTrait for ParkingService {
    fn get_towns(&self) -> Result<Vec<Town>> {
        self.parking_repository.get_towns()
    }

    fn create_town(&self, new_town: NewTown) -> Result<Town> {
        if new_town.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.parking_repository.create_town(new_town)
    }

    fn get_areas(&self, town_id: &str) -> Result<Vec<Area>> {
        self.parking_repository.get_areas(town_id)
    }

    fn create_area(&self, new_area: NewArea) -> Result<Area> {
        if new_area.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.parking_repository.create_area(new_area)
    }

    fn get_sections(&self, area_id: &str) -> Result<Vec<ParkingSection>> {
        self.parking_repository.get_sections(area_id)
    }

    fn create_section(&self, new_section: NewParkingSection) -> Result<ParkingSection> {
        if new_section.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.parking_repository.create_section(new_section)
    }

    /// Creates a parking ticket: resolve the vehicle and section, compute
    /// the amount, snapshot the descriptive fields, persist.
    fn create_ticket(&self, new_ticket: NewParkingTicket) -> Result<ParkingTicket> {
        new_ticket.validate()?;

        let context = self.resolve_section(&new_ticket)?;

        let vehicle = self.parking_repository.get_or_create_vehicle(
            &new_ticket.owner_id,
            new_ticket.plate_number.trim(),
            new_ticket.vehicle_type.as_deref(),
        )?;

        // The stored vehicle type wins over the submitted one.
        let amount = calculate_ticket_amount(
            &vehicle.vehicle_type,
            new_ticket.duration,
            &new_ticket.time_unit,
        );

        let now = Utc::now().naive_utc();
        let row = ParkingTicketDB {
            id: Uuid::new_v4().to_string(),
            vehicle_id: vehicle.id.clone(),
            section_id: context.section.id.clone(),
            custom_place: new_ticket.custom_place,
            duration: new_ticket.duration,
            time_unit: new_ticket.time_unit,
            amount: amount.to_string(),
            paid: false,
            plate_number: vehicle.plate_number.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            town_name: Some(context.town.name.clone()),
            area_name: Some(context.area.name.clone()),
            created_at: now,
            updated_at: now,
        };

        let ticket = self.parking_repository.insert_ticket(row)?;
        debug!(
            "Issued parking ticket for {} at {}/{} ({} {})",
            ticket.plate_number,
            context.town.name,
            context.area.name,
            ticket.duration,
            ticket.time_unit
        );
        Ok(ticket)
    }

    fn get_ticket(&self, ticket_id: &str) -> Result<ParkingTicket> {
        self.parking_repository.get_ticket(ticket_id)
    }

    fn get_tickets_by_owner(&self, owner_id: &str) -> Result<Vec<ParkingTicket>> {
        self.parking_repository.get_tickets_by_owner(owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::constants::*;
    use crate::errors::Error;
    use crate::parking::parking_model::Vehicle;

    // --- Mock parking repository ---

    struct MockParkingRepository {
        vehicles: Mutex<HashMap<(String, String), Vehicle>>,
        sections: Mutex<HashMap<String, SectionContext>>,
        custom_sections: Mutex<Vec<(String, String)>>,
        inserted: Mutex<Vec<ParkingTicketDB>>,
    }

    impl MockParkingRepository {
        fn new() -> Self {
            Self {
                vehicles: Mutex::new(HashMap::new()),
                sections: Mutex::new(HashMap::new()),
                custom_sections: Mutex::new(Vec::new()),
                inserted: Mutex::new(Vec::new()),
            }
        }

        fn with_section(self, context: SectionContext) -> Self {
            self.sections
                .lock()
                .unwrap()
                .insert(context.section.id.clone(), context);
            self
        }

        fn with_vehicle(self, vehicle: Vehicle) -> Self {
            self.vehicles.lock().unwrap().insert(
                (vehicle.owner_id.clone(), vehicle.plate_number.clone()),
                vehicle,
            );
            self
        }
    }

    impl ParkingRepositoryTrait for MockParkingRepository {
        fn get_towns(&self) -> Result<Vec<Town>> {
            Ok(Vec::new())
        }

        fn create_town(&self, _new_town: NewTown) -> Result<Town> {
            unimplemented!("not used in these tests")
        }

        fn get_areas(&self, _town_id: &str) -> Result<Vec<Area>> {
            Ok(Vec::new())
        }

        fn create_area(&self, _new_area: NewArea) -> Result<Area> {
            unimplemented!("not used in these tests")
        }

        fn get_sections(&self, _area_id: &str) -> Result<Vec<ParkingSection>> {
            Ok(Vec::new())
        }

        fn create_section(&self, _new_section: NewParkingSection) -> Result<ParkingSection> {
            unimplemented!("not used in these tests")
        }

        fn get_section_context(&self, section_id: &str) -> Result<SectionContext> {
            self.sections
                .lock()
                .unwrap()
                .get(section_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Parking section '{}'", section_id)))
        }

        fn get_or_create_vehicle(
            &self,
            owner_id: &str,
            plate_number: &str,
            vehicle_type: Option<&str>,
        ) -> Result<Vehicle> {
            let mut vehicles = self.vehicles.lock().unwrap();
            let key = (owner_id.to_string(), plate_number.to_string());
            if let Some(vehicle) = vehicles.get(&key) {
                return Ok(vehicle.clone());
            }
            let vehicle_type = vehicle_type
                .ok_or_else(|| ValidationError::MissingField("vehicleType".to_string()))?;
            let vehicle = Vehicle {
                id: format!("vehicle-{}", vehicles.len() + 1),
                owner_id: owner_id.to_string(),
                plate_number: plate_number.to_string(),
                vehicle_type: vehicle_type.to_string(),
            };
            vehicles.insert(key, vehicle.clone());
            Ok(vehicle)
        }

        fn get_or_create_custom_section(
            &self,
            area_id: &str,
            name: &str,
        ) -> Result<SectionContext> {
            self.custom_sections
                .lock()
                .unwrap()
                .push((area_id.to_string(), name.to_string()));
            let context = SectionContext {
                section: ParkingSection {
                    id: "section-custom".to_string(),
                    area_id: area_id.to_string(),
                    name: name.to_string(),
                    capacity: 1,
                    is_custom: true,
                },
                area: Area {
                    id: area_id.to_string(),
                    town_id: "town-1".to_string(),
                    name: "CBD".to_string(),
                },
                town: Town {
                    id: "town-1".to_string(),
                    name: "Nyeri".to_string(),
                },
            };
            Ok(context)
        }

        fn insert_ticket(&self, ticket: ParkingTicketDB) -> Result<ParkingTicket> {
            self.inserted.lock().unwrap().push(ticket.clone());
            ParkingTicket::try_from(ticket)
        }

        fn get_ticket(&self, ticket_id: &str) -> Result<ParkingTicket> {
            Err(Error::NotFound(format!("Parking ticket '{}'", ticket_id)))
        }

        fn get_tickets_by_owner(&self, _owner_id: &str) -> Result<Vec<ParkingTicket>> {
            Ok(Vec::new())
        }
    }

    fn catalog_context() -> SectionContext {
        SectionContext {
            section: ParkingSection {
                id: "section-1".to_string(),
                area_id: "area-1".to_string(),
                name: "Main Street".to_string(),
                capacity: 40,
                is_custom: false,
            },
            area: Area {
                id: "area-1".to_string(),
                town_id: "town-1".to_string(),
                name: "CBD".to_string(),
            },
            town: Town {
                id: "town-1".to_string(),
                name: "Nyeri".to_string(),
            },
        }
    }

    fn new_ticket() -> NewParkingTicket {
        NewParkingTicket {
            owner_id: "user-1".to_string(),
            plate_number: "KCB 124B".to_string(),
            vehicle_type: Some(VEHICLE_TYPE_TRUCK_TANKER.to_string()),
            section_id: Some("section-1".to_string()),
            area_id: None,
            custom_place: None,
            duration: 3,
            time_unit: TIME_UNIT_HOURS.to_string(),
        }
    }

    #[test]
    fn create_ticket_computes_amount_and_snapshots() {
        let repo = Arc::new(MockParkingRepository::new().with_section(catalog_context()));
        let service = ParkingService::new(repo.clone());

        let ticket = service.create_ticket(new_ticket()).unwrap();

        assert_eq!(ticket.amount, dec!(540.00));
        assert_eq!(ticket.plate_number, "KCB 124B");
        assert_eq!(ticket.vehicle_type, VEHICLE_TYPE_TRUCK_TANKER);
        assert_eq!(ticket.town_name.as_deref(), Some("Nyeri"));
        assert_eq!(ticket.area_name.as_deref(), Some("CBD"));
        assert!(!ticket.paid);
        assert_eq!(repo.inserted.lock().unwrap().len(), 1);
    }

    #[test]
    fn existing_vehicle_type_is_not_overwritten() {
        let repo = Arc::new(
            MockParkingRepository::new()
                .with_section(catalog_context())
                .with_vehicle(Vehicle {
                    id: "vehicle-9".to_string(),
                    owner_id: "user-1".to_string(),
                    plate_number: "KCB 124B".to_string(),
                    vehicle_type: VEHICLE_TYPE_SALOON.to_string(),
                }),
        );
        let service = ParkingService::new(repo);

        // Submitted truck_tanker, but the stored saloon rate applies.
        let ticket = service.create_ticket(new_ticket()).unwrap();
        assert_eq!(ticket.vehicle_type, VEHICLE_TYPE_SALOON);
        assert_eq!(ticket.amount, dec!(180.00));
    }

    #[test]
    fn first_registration_requires_vehicle_type() {
        let repo = Arc::new(MockParkingRepository::new().with_section(catalog_context()));
        let service = ParkingService::new(repo);

        let mut input = new_ticket();
        input.vehicle_type = None;
        let err = service.create_ticket(input).unwrap_err();
        assert!(err.to_string().contains("vehicleType"));
    }

    #[test]
    fn missing_section_and_custom_place_names_both_fields() {
        let repo = Arc::new(MockParkingRepository::new());
        let service = ParkingService::new(repo);

        let mut input = new_ticket();
        input.section_id = None;
        input.custom_place = None;

        let err = service.create_ticket(input).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("sectionId"));
        assert!(message.contains("customPlace"));
    }

    #[test]
    fn custom_place_creates_custom_section() {
        let repo = Arc::new(MockParkingRepository::new());
        let service = ParkingService::new(repo.clone());

        let mut input = new_ticket();
        input.section_id = None;
        input.area_id = Some("area-1".to_string());
        input.custom_place = Some("Behind the market".to_string());

        let ticket = service.create_ticket(input).unwrap();
        assert_eq!(ticket.section_id, "section-custom");
        assert_eq!(
            repo.custom_sections.lock().unwrap().as_slice(),
            &[("area-1".to_string(), "Behind the market".to_string())]
        );
    }

    #[test]
    fn custom_place_without_area_is_rejected() {
        let repo = Arc::new(MockParkingRepository::new());
        let service = ParkingService::new(repo);

        let mut input = new_ticket();
        input.section_id = None;
        input.custom_place = Some("Behind the market".to_string());

        let err = service.create_ticket(input).unwrap_err();
        assert!(err.to_string().contains("areaId"));
    }
}
