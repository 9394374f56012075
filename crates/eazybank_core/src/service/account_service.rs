//! Account use-case service.
//!
//! # Responsibility
//! - Implement create/fetch/update/delete business rules over the
//!   customer/account repository.
//! - Decide the success/failure outcome of each operation.
//!
//! # Invariants
//! - Expected business failures (not found, conflict, not confirmed) are
//!   returned as values; only storage faults propagate as errors.
//! - Generated account numbers are exactly 10 decimal digits and checked for
//!   collision before use.
//! - An account number never changes across an update.

use crate::model::account::{Account, DEFAULT_ACCOUNT_TYPE, DEFAULT_BRANCH_ADDRESS};
use crate::model::customer::CustomerDetails;
use crate::repo::account_repo::{AccountRepository, RepoError};
use log::{info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound on random account-number draws before giving up.
const MAX_GENERATION_ATTEMPTS: u32 = 16;

/// Service error for account use-cases.
#[derive(Debug)]
pub enum AccountServiceError {
    /// Named entity could not be located by the given lookup key.
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    /// A customer with this mobile number is already registered.
    CustomerAlreadyExists(String),
    /// Random generation kept colliding with existing account numbers.
    AccountNumberExhausted,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AccountServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                resource,
                field,
                value,
            } => write!(
                f,
                "{resource} not found with the given input data {field}: '{value}'"
            ),
            Self::CustomerAlreadyExists(mobile_number) => write!(
                f,
                "customer already registered with mobile number '{mobile_number}'"
            ),
            Self::AccountNumberExhausted => write!(
                f,
                "could not generate a unique account number after {MAX_GENERATION_ATTEMPTS} attempts"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            // A concurrent create can slip past the service-level existence
            // check; the storage UNIQUE constraint reports it as this variant.
            RepoError::MobileNumberTaken(mobile_number) => {
                Self::CustomerAlreadyExists(mobile_number)
            }
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, AccountServiceError>;

/// Account service facade over repository implementations.
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new customer and account pair.
    ///
    /// # Contract
    /// - The caller has already validated the payload.
    /// - A duplicate mobile number is a conflict, not a second customer.
    /// - The account number is generated, collision-checked, and the pair is
    ///   persisted atomically with default account type and branch address.
    pub fn create_account(&self, details: &CustomerDetails) -> ServiceResult<CustomerDetails> {
        if self.repo.mobile_number_exists(&details.mobile_number)? {
            warn!(
                "event=account_create module=service status=conflict mobile_number={}",
                details.mobile_number
            );
            return Err(AccountServiceError::CustomerAlreadyExists(
                details.mobile_number.clone(),
            ));
        }

        let account_number = self.generate_account_number()?;
        let customer = details.to_new_customer();
        let account = Account::new(
            account_number,
            customer.customer_id,
            DEFAULT_ACCOUNT_TYPE,
            DEFAULT_BRANCH_ADDRESS,
        );

        self.repo.create_pair(&customer, &account)?;
        info!(
            "event=account_create module=service status=ok account_number={}",
            account.account_number
        );
        Ok(CustomerDetails::from_records(&customer, &account))
    }

    /// Fetches customer and account details by mobile number.
    pub fn fetch_account(&self, mobile_number: &str) -> ServiceResult<CustomerDetails> {
        let customer = self
            .repo
            .find_customer_by_mobile(mobile_number)?
            .ok_or_else(|| AccountServiceError::NotFound {
                resource: "Customer",
                field: "mobileNumber",
                value: mobile_number.to_string(),
            })?;

        let account = self
            .repo
            .find_account_by_customer(customer.customer_id)?
            .ok_or_else(|| AccountServiceError::NotFound {
                resource: "Account",
                field: "customerId",
                value: customer.customer_id.to_string(),
            })?;

        info!("event=account_fetch module=service status=ok");
        Ok(CustomerDetails::from_records(&customer, &account))
    }

    /// Updates account and customer fields, matched by account number.
    ///
    /// # Contract
    /// - The embedded account number must already exist.
    /// - Returns `Ok(true)` on a confirmed write, `Ok(false)` when the write
    ///   could not be confirmed (zero rows applied).
    pub fn update_account(&self, details: &CustomerDetails) -> ServiceResult<bool> {
        let account_details = details
            .account
            .as_ref()
            .ok_or_else(|| AccountServiceError::NotFound {
                resource: "Account",
                field: "accountNumber",
                value: String::new(),
            })?;

        let mut account = self
            .repo
            .find_account_by_number(&account_details.account_number)?
            .ok_or_else(|| AccountServiceError::NotFound {
                resource: "Account",
                field: "accountNumber",
                value: account_details.account_number.clone(),
            })?;

        let mut customer = self
            .repo
            .find_customer_by_id(account.customer_id)?
            .ok_or_else(|| AccountServiceError::NotFound {
                resource: "Customer",
                field: "customerId",
                value: account.customer_id.to_string(),
            })?;

        account_details.apply_to_account(&mut account);
        details.apply_to_customer(&mut customer);

        let confirmed = self.repo.update_pair(&customer, &account)?;
        info!(
            "event=account_update module=service status={} account_number={}",
            if confirmed { "ok" } else { "unconfirmed" },
            account.account_number
        );
        Ok(confirmed)
    }

    /// Deletes the customer and account pair keyed by mobile number.
    ///
    /// Returns `Ok(true)` on confirmed deletion, `Ok(false)` when no rows
    /// were removed.
    pub fn delete_account(&self, mobile_number: &str) -> ServiceResult<bool> {
        let customer = self
            .repo
            .find_customer_by_mobile(mobile_number)?
            .ok_or_else(|| AccountServiceError::NotFound {
                resource: "Customer",
                field: "mobileNumber",
                value: mobile_number.to_string(),
            })?;

        let confirmed = self.repo.delete_pair(customer.customer_id)?;
        info!(
            "event=account_delete module=service status={}",
            if confirmed { "ok" } else { "unconfirmed" }
        );
        Ok(confirmed)
    }

    fn generate_account_number(&self) -> ServiceResult<String> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            // Lower bound keeps the number at exactly 10 digits.
            let candidate = rng.gen_range(1_000_000_000u64..10_000_000_000u64).to_string();
            if !self.repo.account_number_exists(&candidate)? {
                return Ok(candidate);
            }
            warn!(
                "event=account_number_generate module=service status=collision account_number={candidate}"
            );
        }
        Err(AccountServiceError::AccountNumberExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountService, AccountServiceError};
    use crate::model::account::Account;
    use crate::model::customer::{Customer, CustomerDetails, CustomerId};
    use crate::repo::account_repo::{AccountRepository, RepoResult};
    use std::cell::Cell;

    // Repository stub with a configurable number of occupied account-number
    // draws; everything else behaves like an empty store.
    struct CollidingRepo {
        collisions_left: Cell<u32>,
    }

    impl CollidingRepo {
        fn with_collisions(collisions: u32) -> Self {
            Self {
                collisions_left: Cell::new(collisions),
            }
        }
    }

    impl AccountRepository for CollidingRepo {
        fn find_customer_by_mobile(&self, _mobile_number: &str) -> RepoResult<Option<Customer>> {
            Ok(None)
        }

        fn find_customer_by_id(&self, _customer_id: CustomerId) -> RepoResult<Option<Customer>> {
            Ok(None)
        }

        fn find_account_by_customer(
            &self,
            _customer_id: CustomerId,
        ) -> RepoResult<Option<Account>> {
            Ok(None)
        }

        fn find_account_by_number(&self, _account_number: &str) -> RepoResult<Option<Account>> {
            Ok(None)
        }

        fn account_number_exists(&self, _account_number: &str) -> RepoResult<bool> {
            let remaining = self.collisions_left.get();
            if remaining > 0 {
                self.collisions_left.set(remaining - 1);
                return Ok(true);
            }
            Ok(false)
        }

        fn mobile_number_exists(&self, _mobile_number: &str) -> RepoResult<bool> {
            Ok(false)
        }

        fn create_pair(&self, _customer: &Customer, _account: &Account) -> RepoResult<()> {
            Ok(())
        }

        fn update_pair(&self, _customer: &Customer, _account: &Account) -> RepoResult<bool> {
            Ok(true)
        }

        fn delete_pair(&self, _customer_id: CustomerId) -> RepoResult<bool> {
            Ok(true)
        }
    }

    fn create_request() -> CustomerDetails {
        CustomerDetails {
            name: "Hardik Yadav".to_string(),
            email: "hardik@example.com".to_string(),
            mobile_number: "9876543210".to_string(),
            account: None,
        }
    }

    #[test]
    fn create_retries_past_a_collision_and_succeeds() {
        let service = AccountService::new(CollidingRepo::with_collisions(3));

        let created = service.create_account(&create_request()).unwrap();
        let account = created.account.expect("create should embed the account");
        assert_eq!(account.account_number.len(), 10);
    }

    #[test]
    fn create_reports_exhaustion_when_every_number_collides() {
        let service = AccountService::new(CollidingRepo::with_collisions(u32::MAX));

        let err = service.create_account(&create_request()).unwrap_err();
        assert!(matches!(err, AccountServiceError::AccountNumberExhausted));
    }
}
