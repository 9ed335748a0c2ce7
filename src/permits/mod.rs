pub(crate) mod permits_model;
pub(crate) mod permits_repository;
pub(crate) mod permits_service;
pub(crate) mod permits_traits;

pub use permits_model::{NewPermit, Permit, PermitDB, PermitUpdate};
pub use permits_repository::PermitRepository;
pub use permits_service::PermitService;
pub use permits_traits::{PermitRepositoryTrait, PermitServiceTrait};
