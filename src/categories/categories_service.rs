use std::sync::Arc;

use log::{debug, info};

use crate::errors::Result;

use super::categories_constants::DEFAULT_PERMIT_CATALOG;
use super::categories_model::{NewPermitCategory, PermitCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};

/// Service for managing the permit-category catalog
pub struct CategoryService {
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self {
            category_repository,
        }
    }
}

impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self) -> Result<Vec<PermitCategory>> {
        self.category_repository.get_categories()
    }

    fn get_category(&self, category_id: &str) -> Result<PermitCategory> {
        self.category_repository.get_category(category_id)
    }

    fn upsert_category(&self, category: NewPermitCategory) -> Result<PermitCategory> {
        category.validate()?;
        self.category_repository.upsert_category(category)
    }

    /// Applies the fixed seed catalog, creating or updating each category
    /// by name. Safe to call on every startup.
    fn seed_default_categories(&self) -> Result<usize> {
        let mut seeded = 0;
        for seed in DEFAULT_PERMIT_CATALOG.iter() {
            let category = self
                .category_repository
                .upsert_category(NewPermitCategory::from(seed))?;
            debug!("Seeded permit category '{}'", category.name);
            seeded += 1;
        }
        info!("Permit category catalog seeded ({} categories)", seeded);
        Ok(seeded)
    }
}
