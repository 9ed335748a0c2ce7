pub(crate) mod payments_model;
pub(crate) mod payments_repository;
pub(crate) mod payments_service;
pub(crate) mod payments_traits;

pub use payments_model::{NewPayment, Payment, PaymentDB};
pub use payments_repository::PaymentRepository;
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
