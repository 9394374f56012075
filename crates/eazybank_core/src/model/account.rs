//! Account entity and transport view.
//!
//! # Invariants
//! - `account_number` is the primary identifier and never changes after
//!   creation; updates match on it, they do not rewrite it.
//! - `customer_id` always references exactly one existing customer.

use crate::model::customer::CustomerId;
use serde::{Deserialize, Serialize};

/// Default account type assigned on create.
pub const DEFAULT_ACCOUNT_TYPE: &str = "Savings";
/// Default branch address assigned on create.
pub const DEFAULT_BRANCH_ADDRESS: &str = "123 Main Street, New York";

/// Persisted account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Exactly 10 decimal digits; unique across all accounts.
    pub account_number: String,
    /// Owning customer's stable internal ID.
    pub customer_id: CustomerId,
    pub account_type: String,
    pub branch_address: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

impl Account {
    /// Creates a new account record owned by the given customer.
    pub fn new(
        account_number: impl Into<String>,
        customer_id: CustomerId,
        account_type: impl Into<String>,
        branch_address: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            customer_id,
            account_type: account_type.into(),
            branch_address: branch_address.into(),
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Transport view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    #[serde(rename = "accountNumber")]
    pub account_number: String,
    #[serde(rename = "accountType")]
    pub account_type: String,
    #[serde(rename = "branchAddress")]
    pub branch_address: String,
}

impl AccountDetails {
    /// Builds the response view from a persisted record.
    pub fn from_record(account: &Account) -> Self {
        Self {
            account_number: account.account_number.clone(),
            account_type: account.account_type.clone(),
            branch_address: account.branch_address.clone(),
        }
    }

    /// Applies updatable account fields onto an existing entity.
    ///
    /// `account_number` is the match key and is deliberately not copied.
    pub fn apply_to_account(&self, account: &mut Account) {
        account.account_type = self.account_type.clone();
        account.branch_address = self.branch_address.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::{Account, AccountDetails};
    use uuid::Uuid;

    #[test]
    fn apply_to_account_never_changes_account_number() {
        let mut account = Account::new("1234567890", Uuid::new_v4(), "Savings", "Main Branch");

        let update = AccountDetails {
            account_number: "0000000000".to_string(),
            account_type: "Current".to_string(),
            branch_address: "New Address".to_string(),
        };
        update.apply_to_account(&mut account);

        assert_eq!(account.account_number, "1234567890");
        assert_eq!(account.account_type, "Current");
        assert_eq!(account.branch_address, "New Address");
    }
}
