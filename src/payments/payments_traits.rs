use crate::errors::Result;

use super::payments_model::{NewPayment, Payment, PaymentDB};

/// Trait defining the contract for Payment repository operations.
pub trait PaymentRepositoryTrait: Send + Sync {
    /// Inserts the payment and rolls the target permit's or ticket's
    /// payment state forward in one transaction.
    fn record_payment(&self, payment: PaymentDB) -> Result<Payment>;
    fn get_payments(&self) -> Result<Vec<Payment>>;
    fn get_payments_by_owner(&self, owner_id: &str) -> Result<Vec<Payment>>;
}

/// Trait defining the contract for Payment service operations.
pub trait PaymentServiceTrait: Send + Sync {
    fn record_payment(&self, new_payment: NewPayment) -> Result<Payment>;
    fn get_payments(&self) -> Result<Vec<Payment>>;
    fn get_payments_by_owner(&self, owner_id: &str) -> Result<Vec<Payment>>;
}
