use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::permits;
use crate::schema::permits::dsl::*;

use super::permits_model::{Permit, PermitDB};
use super::permits_traits::PermitRepositoryTrait;

pub struct PermitRepository {
    pool: Arc<DbPool>,
}

impl PermitRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PermitRepository { pool }
    }
}

impl PermitRepositoryTrait for PermitRepository {
    fn get_permit(&self, permit_id: &str) -> Result<Permit> {
        let mut conn = get_connection(&self.pool)?;
        let db_permit = permits
            .find(permit_id)
            .first::<PermitDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Permit '{}'", permit_id)))?;
        Permit::try_from(db_permit)
    }

    fn get_permit_by_number(&self, number: &str) -> Result<Option<Permit>> {
        let mut conn = get_connection(&self.pool)?;
        permits
            .filter(permit_number.eq(number))
            .first::<PermitDB>(&mut conn)
            .optional()?
            .map(Permit::try_from)
            .transpose()
    }

    fn get_permits(&self) -> Result<Vec<Permit>> {
        let mut conn = get_connection(&self.pool)?;
        permits
            .order(created_at.desc())
            .load::<PermitDB>(&mut conn)?
            .into_iter()
            .map(Permit::try_from)
            .collect()
    }

    fn get_permits_by_owner(&self, permit_owner_id: &str) -> Result<Vec<Permit>> {
        let mut conn = get_connection(&self.pool)?;
        permits
            .filter(owner_id.eq(permit_owner_id))
            .order(created_at.desc())
            .load::<PermitDB>(&mut conn)?
            .into_iter()
            .map(Permit::try_from)
            .collect()
    }

    fn insert_permit(&self, permit: PermitDB) -> Result<Permit> {
        let mut conn = get_connection(&self.pool)?;
        let db_permit = diesel::insert_into(permits::table)
            .values(&permit)
            .returning(permits::all_columns)
            .get_result::<PermitDB>(&mut conn)?;
        Permit::try_from(db_permit)
    }

    fn update_permit(&self, permit: PermitDB) -> Result<Permit> {
        let mut conn = get_connection(&self.pool)?;
        let permit_id = permit.id.clone();

        diesel::update(permits.find(&permit_id))
            .set(&permit)
            .execute(&mut conn)?;

        let db_permit = permits.find(&permit_id).first::<PermitDB>(&mut conn)?;
        Permit::try_from(db_permit)
    }
}
