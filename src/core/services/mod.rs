pub mod expense_service;
pub mod member_service;
pub mod payment_service;

pub use expense_service::ExpenseService;
pub use member_service::MemberService;
pub use payment_service::PaymentService;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Validation taxonomy for the bookkeeping layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Integrity violation: {0}")]
    Integrity(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
