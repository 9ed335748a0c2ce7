use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Domain model representing an issued permit.
///
/// `permit_number`, `end_date` and `total_fee` are derived at save time
/// and are never settable independently of the creation/update pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permit {
    pub id: String,
    pub category_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub permit_number: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub duration_months: Option<i32>,
    pub total_fee: Decimal,
    pub amount_paid: Decimal,
    pub paid: bool,
    pub renewed: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for permits
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    AsChangeset,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::permits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct PermitDB {
    pub id: String,
    pub category_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub permit_number: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub duration_months: Option<i32>,
    pub total_fee: String,
    pub amount_paid: String,
    pub paid: bool,
    pub renewed: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PermitDB> for Permit {
    type Error = Error;

    fn try_from(db: PermitDB) -> Result<Self, Self::Error> {
        Ok(Permit {
            id: db.id,
            category_id: db.category_id,
            owner_id: db.owner_id,
            owner_name: db.owner_name,
            permit_number: db.permit_number,
            start_date: db.start_date,
            end_date: db.end_date,
            duration_days: db.duration_days,
            duration_months: db.duration_months,
            total_fee: Decimal::from_str(&db.total_fee)?,
            amount_paid: Decimal::from_str(&db.amount_paid)?,
            paid: db.paid,
            renewed: db.renewed,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Input model for creating a new permit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermit {
    pub id: Option<String>,
    pub category_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub permit_number: Option<String>,
    /// YYYY-MM-DD
    pub start_date: String,
    /// Explicit end date, honoured for freeform categories only.
    pub end_date: Option<String>,
    pub duration_days: Option<i32>,
    pub duration_months: Option<i32>,
    pub notes: Option<String>,
}

impl NewPermit {
    /// Validates the new permit data
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.category_id.trim().is_empty() {
            return Err(ValidationError::MissingField("categoryId".to_string()).into());
        }
        if self.owner_id.trim().is_empty() {
            return Err(ValidationError::MissingField("ownerId".to_string()).into());
        }
        if self.owner_name.trim().is_empty() {
            return Err(ValidationError::MissingField("ownerName".to_string()).into());
        }
        parse_date("startDate", &self.start_date)?;
        if let Some(end) = self.end_date.as_deref() {
            parse_date("endDate", end)?;
        }
        Ok(())
    }

    pub fn start_date(&self) -> crate::errors::Result<NaiveDate> {
        parse_date("startDate", &self.start_date)
    }

    pub fn explicit_end_date(&self) -> crate::errors::Result<Option<NaiveDate>> {
        self.end_date
            .as_deref()
            .map(|end| parse_date("endDate", end))
            .transpose()
    }
}

/// Input model for updating an existing permit. The derived fields
/// (`end_date`, `total_fee`, `permit_number`) are deliberately absent:
/// they are recomputed from these inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitUpdate {
    pub id: String,
    pub owner_name: String,
    /// YYYY-MM-DD
    pub start_date: String,
    /// Explicit end date, honoured for freeform categories only.
    pub end_date: Option<String>,
    pub duration_days: Option<i32>,
    pub duration_months: Option<i32>,
    pub notes: Option<String>,
}

impl PermitUpdate {
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        if self.owner_name.trim().is_empty() {
            return Err(ValidationError::MissingField("ownerName".to_string()).into());
        }
        parse_date("startDate", &self.start_date)?;
        if let Some(end) = self.end_date.as_deref() {
            parse_date("endDate", end)?;
        }
        Ok(())
    }

    pub fn start_date(&self) -> crate::errors::Result<NaiveDate> {
        parse_date("startDate", &self.start_date)
    }

    pub fn explicit_end_date(&self) -> crate::errors::Result<Option<NaiveDate>> {
        self.end_date
            .as_deref()
            .map(|end| parse_date("endDate", end))
            .transpose()
    }
}

fn parse_date(field: &str, value: &str) -> crate::errors::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidField {
            field: field.to_string(),
            message: format!("invalid date '{}', expected YYYY-MM-DD", value),
        }
        .into()
    })
}
