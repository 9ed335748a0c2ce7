use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Domain model for a recorded payment against a permit or a parking
/// ticket. The reference token is the value printed on receipts and is
/// unique across all payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub owner_id: String,
    pub reference: String,
    pub permit_id: Option<String>,
    pub ticket_id: Option<String>,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// Database model for payments
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentDB {
    pub id: String,
    pub owner_id: String,
    pub reference: String,
    pub permit_id: Option<String>,
    pub ticket_id: Option<String>,
    pub amount: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<PaymentDB> for Payment {
    type Error = Error;

    fn try_from(db: PaymentDB) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: db.id,
            owner_id: db.owner_id,
            reference: db.reference,
            permit_id: db.permit_id,
            ticket_id: db.ticket_id,
            amount: Decimal::from_str(&db.amount)?,
            created_at: db.created_at,
        })
    }
}

/// Input model for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub owner_id: String,
    pub permit_id: Option<String>,
    pub ticket_id: Option<String>,
    pub amount: Decimal,
}

impl NewPayment {
    /// Validates the payment data: a positive amount targeting exactly one
    /// of a permit or a ticket.
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.owner_id.trim().is_empty() {
            return Err(ValidationError::MissingField("ownerId".to_string()).into());
        }
        match (&self.permit_id, &self.ticket_id) {
            (Some(_), None) | (None, Some(_)) => {}
            _ => {
                return Err(ValidationError::InvalidInput(
                    "a payment must target exactly one of (permitId, ticketId)".to_string(),
                )
                .into())
            }
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidField {
                field: "amount".to_string(),
                message: "payment amount must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
