//! Customer entity and transport view.
//!
//! # Responsibility
//! - Define the persisted customer record keyed by a stable internal ID.
//! - Define the `CustomerDetails` view the boundary layer serializes.
//! - Map between the two shapes with plain, reviewable functions.
//!
//! # Invariants
//! - `customer_id` is stable and never reused for another customer.
//! - `mobile_number` is the external lookup key and unique across customers.

use crate::model::account::{Account, AccountDetails};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable internal identifier for a customer.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CustomerId = Uuid;

/// Persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Stable internal ID. Never exposed as a lookup key to callers.
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    /// Exactly 10 decimal digits; external lookup key for fetch/delete.
    pub mobile_number: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

impl Customer {
    /// Creates a new customer record with a generated stable ID.
    ///
    /// Timestamps are assigned by storage defaults on insert; this
    /// constructor initializes them to zero placeholders.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        mobile_number: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            mobile_number: mobile_number.into(),
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Transport view of a customer with the embedded account.
///
/// This is the shape the boundary layer accepts and serializes. Field names
/// follow the external API schema, not the storage schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    /// Absent on create requests; populated on fetch responses and required
    /// on update requests.
    #[serde(rename = "accountDetails", skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountDetails>,
}

impl CustomerDetails {
    /// Builds the fetch-response view from persisted records.
    pub fn from_records(customer: &Customer, account: &Account) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            mobile_number: customer.mobile_number.clone(),
            account: Some(AccountDetails::from_record(account)),
        }
    }

    /// Maps the create-request view into a new customer entity.
    pub fn to_new_customer(&self) -> Customer {
        Customer::new(
            self.name.clone(),
            self.email.clone(),
            self.mobile_number.clone(),
        )
    }

    /// Applies updatable customer fields onto an existing entity.
    ///
    /// The stable `customer_id` and audit timestamps are never touched here;
    /// `updated_at` is stamped by the repository on write.
    pub fn apply_to_customer(&self, customer: &mut Customer) {
        customer.name = self.name.clone();
        customer.email = self.email.clone();
        customer.mobile_number = self.mobile_number.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::{Customer, CustomerDetails};
    use crate::model::account::Account;

    fn sample_customer() -> Customer {
        Customer::new("Hardik Yadav", "hardik@example.com", "9876543210")
    }

    #[test]
    fn from_records_embeds_account_view() {
        let customer = sample_customer();
        let account = Account::new("1234567890", customer.customer_id, "Savings", "Main Branch");

        let view = CustomerDetails::from_records(&customer, &account);
        assert_eq!(view.name, "Hardik Yadav");
        assert_eq!(view.mobile_number, "9876543210");
        let embedded = view.account.expect("account view should be embedded");
        assert_eq!(embedded.account_number, "1234567890");
        assert_eq!(embedded.account_type, "Savings");
    }

    #[test]
    fn apply_to_customer_preserves_identity() {
        let mut customer = sample_customer();
        let original_id = customer.customer_id;

        let update = CustomerDetails {
            name: "Hardik Y Yadav".to_string(),
            email: "hardik.y@example.com".to_string(),
            mobile_number: "9123456780".to_string(),
            account: None,
        };
        update.apply_to_customer(&mut customer);

        assert_eq!(customer.customer_id, original_id);
        assert_eq!(customer.name, "Hardik Y Yadav");
        assert_eq!(customer.mobile_number, "9123456780");
    }

    #[test]
    fn details_serialize_with_external_field_names() {
        let customer = sample_customer();
        let account = Account::new("1234567890", customer.customer_id, "Savings", "Main Branch");
        let view = CustomerDetails::from_records(&customer, &account);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("mobileNumber").is_some());
        assert!(json.get("accountDetails").is_some());
        assert!(json["accountDetails"].get("accountNumber").is_some());
    }
}
