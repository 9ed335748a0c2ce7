pub(crate) mod categories_constants;
pub(crate) mod categories_model;
pub(crate) mod categories_repository;
pub(crate) mod categories_service;
pub(crate) mod categories_traits;

pub use categories_constants::*;
pub use categories_model::{BillingMode, CategorySeed, NewPermitCategory, PermitCategory, PermitCategoryDB};
pub use categories_repository::CategoryRepository;
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
