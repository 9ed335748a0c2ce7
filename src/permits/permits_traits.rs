use crate::errors::Result;

use super::permits_model::{NewPermit, Permit, PermitDB, PermitUpdate};

/// Trait defining the contract for Permit repository operations.
pub trait PermitRepositoryTrait: Send + Sync {
    fn get_permit(&self, permit_id: &str) -> Result<Permit>;
    fn get_permit_by_number(&self, number: &str) -> Result<Option<Permit>>;
    fn get_permits(&self) -> Result<Vec<Permit>>;
    fn get_permits_by_owner(&self, owner_id: &str) -> Result<Vec<Permit>>;
    fn insert_permit(&self, permit: PermitDB) -> Result<Permit>;
    fn update_permit(&self, permit: PermitDB) -> Result<Permit>;
}

/// Trait defining the contract for Permit service operations.
pub trait PermitServiceTrait: Send + Sync {
    fn get_permit(&self, permit_id: &str) -> Result<Permit>;
    fn get_permits(&self) -> Result<Vec<Permit>>;
    fn get_permits_by_owner(&self, owner_id: &str) -> Result<Vec<Permit>>;
    fn create_permit(&self, new_permit: NewPermit) -> Result<Permit>;
    fn update_permit(&self, update: PermitUpdate) -> Result<Permit>;
    fn mark_renewed(&self, permit_id: &str) -> Result<Permit>;
}
