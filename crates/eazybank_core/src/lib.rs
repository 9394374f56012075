//! Core domain logic for EazyBank account management.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod response;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountDetails, DEFAULT_ACCOUNT_TYPE, DEFAULT_BRANCH_ADDRESS};
pub use model::customer::{Customer, CustomerDetails, CustomerId};
pub use repo::account_repo::{
    AccountRepository, RepoError, RepoResult, SqliteAccountRepository,
};
pub use response::{created, delete_outcome, update_outcome, OperationResponse};
pub use service::account_service::{AccountService, AccountServiceError, ServiceResult};
pub use validation::{
    validate_customer, validate_customer_update, validate_mobile_number_param, FieldViolation,
    ValidationError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
