use std::sync::Arc;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::errors::Result;

use super::payments_model::{NewPayment, Payment, PaymentDB};
use super::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};

/// Service for recording and auditing payments. A payment's reference
/// token is generated here; a duplicate reference is a genuine conflict
/// and surfaces as such without retry.
pub struct PaymentService {
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
}

/// Receipt reference: the first segment of a v4 UUID, uppercased.
fn generate_reference() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

impl PaymentService {
    pub fn new(payment_repository: Arc<dyn PaymentRepositoryTrait>) -> Self {
        Self { payment_repository }
    }
}

impl PaymentServiceTrait for PaymentService {
    fn record_payment(&self, new_payment: NewPayment) -> Result<Payment> {
        new_payment.validate()?;

        let row = PaymentDB {
            id: Uuid::new_v4().to_string(),
            owner_id: new_payment.owner_id,
            reference: generate_reference(),
            permit_id: new_payment.permit_id,
            ticket_id: new_payment.ticket_id,
            amount: new_payment.amount.to_string(),
            created_at: Utc::now().naive_utc(),
        };

        let payment = self.payment_repository.record_payment(row)?;
        debug!(
            "Recorded payment {} of {} for owner {}",
            payment.reference, payment.amount, payment.owner_id
        );
        Ok(payment)
    }

    fn get_payments(&self) -> Result<Vec<Payment>> {
        self.payment_repository.get_payments()
    }

    fn get_payments_by_owner(&self, owner_id: &str) -> Result<Vec<Payment>> {
        self.payment_repository.get_payments_by_owner(owner_id)
    }
}
