use std::sync::Arc;

use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::permit_categories;
use crate::schema::permit_categories::dsl::*;

use super::categories_model::{NewPermitCategory, PermitCategory, PermitCategoryDB};
use super::categories_traits::CategoryRepositoryTrait;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CategoryRepository { pool }
    }
}

impl CategoryRepositoryTrait for CategoryRepository {
    fn get_categories(&self) -> Result<Vec<PermitCategory>> {
        let mut conn = get_connection(&self.pool)?;
        permit_categories
            .order(name.asc())
            .load::<PermitCategoryDB>(&mut conn)?
            .into_iter()
            .map(PermitCategory::try_from)
            .collect()
    }

    fn get_category(&self, category_id: &str) -> Result<PermitCategory> {
        let mut conn = get_connection(&self.pool)?;
        let db_category = permit_categories
            .find(category_id)
            .first::<PermitCategoryDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Permit category '{}'", category_id)))?;
        PermitCategory::try_from(db_category)
    }

    fn get_category_by_name(&self, category_name: &str) -> Result<Option<PermitCategory>> {
        let mut conn = get_connection(&self.pool)?;
        permit_categories
            .filter(name.eq(category_name))
            .first::<PermitCategoryDB>(&mut conn)
            .optional()?
            .map(PermitCategory::try_from)
            .transpose()
    }

    fn upsert_category(&self, category: NewPermitCategory) -> Result<PermitCategory> {
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();

        let row = PermitCategoryDB {
            id: category.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: category.name,
            billing_mode: category.billing_mode.as_str().to_string(),
            registration_fee: category.registration_fee.to_string(),
            annual_fee: category.annual_fee.to_string(),
            monthly_fee: category.monthly_fee.to_string(),
            daily_fee: category.daily_fee.to_string(),
            created_at: now,
            updated_at: now,
        };

        let db_category = diesel::insert_into(permit_categories::table)
            .values(&row)
            .on_conflict(name)
            .do_update()
            .set((
                billing_mode.eq(row.billing_mode.clone()),
                registration_fee.eq(row.registration_fee.clone()),
                annual_fee.eq(row.annual_fee.clone()),
                monthly_fee.eq(row.monthly_fee.clone()),
                daily_fee.eq(row.daily_fee.clone()),
                updated_at.eq(now),
            ))
            .returning(permit_categories::all_columns)
            .get_result::<PermitCategoryDB>(&mut conn)?;

        PermitCategory::try_from(db_category)
    }
}
