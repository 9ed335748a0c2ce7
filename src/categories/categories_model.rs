use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Billing mode of a permit category. Exactly one mode is active per
/// category; the mode decides which fee field and duration input apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingMode {
    Yearly,
    Monthly,
    Daily,
    Freeform,
}

impl BillingMode {
    pub fn as_str(&self) -> &'static str {
        use crate::categories::categories_constants::*;
        match self {
            BillingMode::Yearly => BILLING_MODE_YEARLY,
            BillingMode::Monthly => BILLING_MODE_MONTHLY,
            BillingMode::Daily => BILLING_MODE_DAILY,
            BillingMode::Freeform => BILLING_MODE_FREEFORM,
        }
    }
}

impl FromStr for BillingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use crate::categories::categories_constants::*;
        match s {
            s if s == BILLING_MODE_YEARLY => Ok(BillingMode::Yearly),
            s if s == BILLING_MODE_MONTHLY => Ok(BillingMode::Monthly),
            s if s == BILLING_MODE_DAILY => Ok(BillingMode::Daily),
            s if s == BILLING_MODE_FREEFORM => Ok(BillingMode::Freeform),
            _ => Err(format!("Unknown billing mode: {}", s)),
        }
    }
}

/// Domain model for a permit category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitCategory {
    pub id: String,
    pub name: String,
    pub billing_mode: BillingMode,
    pub registration_fee: Decimal,
    pub annual_fee: Decimal,
    pub monthly_fee: Decimal,
    pub daily_fee: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for permit categories. Monetary amounts are stored as
/// TEXT so that they round-trip losslessly through SQLite.
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
#[diesel(table_name = crate::schema::permit_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PermitCategoryDB {
    pub id: String,
    pub name: String,
    pub billing_mode: String,
    pub registration_fee: String,
    pub annual_fee: String,
    pub monthly_fee: String,
    pub daily_fee: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PermitCategoryDB> for PermitCategory {
    type Error = Error;

    fn try_from(db: PermitCategoryDB) -> Result<Self, Self::Error> {
        let billing_mode = BillingMode::from_str(&db.billing_mode)
            .map_err(ValidationError::InvalidInput)?;
        Ok(PermitCategory {
            id: db.id,
            name: db.name,
            billing_mode,
            registration_fee: Decimal::from_str(&db.registration_fee)?,
            annual_fee: Decimal::from_str(&db.annual_fee)?,
            monthly_fee: Decimal::from_str(&db.monthly_fee)?,
            daily_fee: Decimal::from_str(&db.daily_fee)?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Input model for creating or updating a permit category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermitCategory {
    pub id: Option<String>,
    pub name: String,
    pub billing_mode: BillingMode,
    pub registration_fee: Decimal,
    pub annual_fee: Decimal,
    pub monthly_fee: Decimal,
    pub daily_fee: Decimal,
}

impl NewPermitCategory {
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        for (field, amount) in [
            ("registrationFee", self.registration_fee),
            ("annualFee", self.annual_fee),
            ("monthlyFee", self.monthly_fee),
            ("dailyFee", self.daily_fee),
        ] {
            if amount.is_sign_negative() {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: "fee amounts cannot be negative".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// One entry of the fixed seed catalog
#[derive(Debug, Clone, Copy)]
pub struct CategorySeed {
    pub name: &'static str,
    pub billing_mode: BillingMode,
    pub registration_fee: Decimal,
    pub annual_fee: Decimal,
    pub monthly_fee: Decimal,
    pub daily_fee: Decimal,
}

impl From<&CategorySeed> for NewPermitCategory {
    fn from(seed: &CategorySeed) -> Self {
        NewPermitCategory {
            id: None,
            name: seed.name.to_string(),
            billing_mode: seed.billing_mode,
            registration_fee: seed.registration_fee,
            annual_fee: seed.annual_fee,
            monthly_fee: seed.monthly_fee,
            daily_fee: seed.daily_fee,
        }
    }
}
