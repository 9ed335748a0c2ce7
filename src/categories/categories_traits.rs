use crate::errors::Result;

use super::categories_model::{NewPermitCategory, PermitCategory};

/// Trait defining the contract for PermitCategory repository operations.
pub trait CategoryRepositoryTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<PermitCategory>>;
    fn get_category(&self, category_id: &str) -> Result<PermitCategory>;
    fn get_category_by_name(&self, category_name: &str) -> Result<Option<PermitCategory>>;
    fn upsert_category(&self, category: NewPermitCategory) -> Result<PermitCategory>;
}

/// Trait defining the contract for PermitCategory service operations.
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<PermitCategory>>;
    fn get_category(&self, category_id: &str) -> Result<PermitCategory>;
    fn upsert_category(&self, category: NewPermitCategory) -> Result<PermitCategory>;
    fn seed_default_categories(&self) -> Result<usize>;
}
