use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::permits::PermitDB;
use crate::schema::{parking_tickets, payments, permits};

use super::payments_model::{Payment, PaymentDB};
use super::payments_traits::PaymentRepositoryTrait;

pub struct PaymentRepository {
    pool: Arc<DbPool>,
}

impl PaymentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PaymentRepository { pool }
    }
}

impl PaymentRepositoryTrait for PaymentRepository {
    fn record_payment(&self, payment: PaymentDB) -> Result<Payment> {
        let db_payment = self.pool.execute(|conn| {
            let now = Utc::now().naive_utc();
            let paid_amount = Decimal::from_str(&payment.amount)?;

            // The target is settled before the payment row goes in, so a
            // payment against a missing permit or ticket surfaces as
            // NotFound rather than a foreign-key failure.
            if let Some(target_permit_id) = payment.permit_id.as_deref() {
                let permit = permits::table
                    .find(target_permit_id)
                    .first::<PermitDB>(conn)
                    .optional()?
                    .ok_or_else(|| Error::NotFound(format!("Permit '{}'", target_permit_id)))?;

                let amount_paid = Decimal::from_str(&permit.amount_paid)? + paid_amount;
                let total_fee = Decimal::from_str(&permit.total_fee)?;

                diesel::update(permits::table.find(target_permit_id))
                    .set((
                        permits::amount_paid.eq(amount_paid.to_string()),
                        permits::paid.eq(amount_paid >= total_fee),
                        permits::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }

            if let Some(target_ticket_id) = payment.ticket_id.as_deref() {
                let amount_due: String = parking_tickets::table
                    .find(target_ticket_id)
                    .select(parking_tickets::amount)
                    .first::<String>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        Error::NotFound(format!("Parking ticket '{}'", target_ticket_id))
                    })?;

                // Tickets carry no accumulator column; the running total is
                // the sum of the ticket's earlier payments plus this one.
                let mut total_paid = paid_amount;
                let prior_amounts: Vec<String> = payments::table
                    .filter(payments::ticket_id.eq(target_ticket_id))
                    .select(payments::amount)
                    .load::<String>(conn)?;
                for prior in &prior_amounts {
                    total_paid += Decimal::from_str(prior)?;
                }

                diesel::update(parking_tickets::table.find(target_ticket_id))
                    .set((
                        parking_tickets::paid.eq(total_paid >= Decimal::from_str(&amount_due)?),
                        parking_tickets::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }

            Ok(diesel::insert_into(payments::table)
                .values(&payment)
                .returning(payments::all_columns)
                .get_result::<PaymentDB>(conn)?)
        })?;

        Payment::try_from(db_payment)
    }

    fn get_payments(&self) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        payments::table
            .order(payments::created_at.desc())
            .load::<PaymentDB>(&mut conn)?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }

    fn get_payments_by_owner(&self, payment_owner_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        payments::table
            .filter(payments::owner_id.eq(payment_owner_id))
            .order(payments::created_at.desc())
            .load::<PaymentDB>(&mut conn)?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }
}
