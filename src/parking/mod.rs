pub(crate) mod parking_model;
pub(crate) mod parking_repository;
pub(crate) mod parking_service;
pub(crate) mod parking_traits;

pub use parking_model::{
    Area, NewArea, NewParkingSection, NewParkingTicket, NewTown, ParkingSection, ParkingTicket,
    ParkingTicketDB, SectionContext, TimeUnit, Town, Vehicle, VehicleType,
};
pub use parking_repository::ParkingRepository;
pub use parking_service::ParkingService;
pub use parking_traits::{ParkingRepositoryTrait, ParkingServiceTrait};
