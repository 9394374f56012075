//! Input validation for customer/account payloads.
//!
//! # Responsibility
//! - Check the shape of boundary payloads before any domain operation runs.
//! - Report every violation in one pass, never fail-fast on the first field.
//!
//! # Invariants
//! - Validation is pure: no storage access, no side effects.
//! - A payload that fails validation must never reach the domain service.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::customer::CustomerDetails;

const NAME_MIN_LEN: usize = 5;
const NAME_MAX_LEN: usize = 30;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
// Empty is allowed: the mobile number doubles as an optional query parameter.
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(|\d{10})$").expect("valid mobile number regex"));
static ACCOUNT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid account number regex"));

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// External field name, e.g. `mobileNumber`.
    pub field: &'static str,
    /// Human-readable message for the boundary layer to surface.
    pub message: &'static str,
}

/// Structured validation failure carrying every violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed:")?;
        for violation in &self.violations {
            write!(f, " [{}: {}]", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Validates a create-request payload.
///
/// The embedded account is ignored here: on create the service generates the
/// account itself, so only customer fields are checked.
pub fn validate_customer(details: &CustomerDetails) -> ValidationResult {
    let mut violations = Vec::new();
    check_customer_fields(details, &mut violations);
    finish(violations)
}

/// Validates an update-request payload.
///
/// Update requires the embedded account: its number is the match key and its
/// mutable fields must be well-formed.
pub fn validate_customer_update(details: &CustomerDetails) -> ValidationResult {
    let mut violations = Vec::new();
    check_customer_fields(details, &mut violations);

    match &details.account {
        None => violations.push(FieldViolation {
            field: "accountDetails",
            message: "Account details cannot be null or empty",
        }),
        Some(account) => {
            if account.account_number.is_empty() {
                violations.push(FieldViolation {
                    field: "accountNumber",
                    message: "Account number cannot be null or empty",
                });
            } else if !ACCOUNT_NUMBER_RE.is_match(&account.account_number) {
                violations.push(FieldViolation {
                    field: "accountNumber",
                    message: "Account number must be 10 digits",
                });
            }
            if account.account_type.trim().is_empty() {
                violations.push(FieldViolation {
                    field: "accountType",
                    message: "Account type cannot be null or empty",
                });
            }
            if account.branch_address.trim().is_empty() {
                violations.push(FieldViolation {
                    field: "branchAddress",
                    message: "Branch address cannot be null or empty",
                });
            }
        }
    }

    finish(violations)
}

/// Validates the `mobileNumber` query parameter used by fetch/delete.
pub fn validate_mobile_number_param(mobile_number: &str) -> ValidationResult {
    if MOBILE_RE.is_match(mobile_number) {
        return Ok(());
    }
    Err(ValidationError {
        violations: vec![FieldViolation {
            field: "mobileNumber",
            message: "Mobile number must be 10 digits",
        }],
    })
}

fn check_customer_fields(details: &CustomerDetails, violations: &mut Vec<FieldViolation>) {
    if details.name.trim().is_empty() {
        violations.push(FieldViolation {
            field: "name",
            message: "Name cannot be null or empty",
        });
    } else {
        let len = details.name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            violations.push(FieldViolation {
                field: "name",
                message: "The length of the customer name should be between 5 and 30",
            });
        }
    }

    if details.email.trim().is_empty() {
        violations.push(FieldViolation {
            field: "email",
            message: "Email address cannot be null or empty",
        });
    } else if !EMAIL_RE.is_match(&details.email) {
        violations.push(FieldViolation {
            field: "email",
            message: "Email address should be a valid value",
        });
    }

    if !MOBILE_RE.is_match(&details.mobile_number) {
        violations.push(FieldViolation {
            field: "mobileNumber",
            message: "Mobile number must be 10 digits",
        });
    }
}

fn finish(violations: Vec<FieldViolation>) -> ValidationResult {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_customer, validate_customer_update, validate_mobile_number_param};
    use crate::model::account::AccountDetails;
    use crate::model::customer::CustomerDetails;

    fn valid_details() -> CustomerDetails {
        CustomerDetails {
            name: "Hardik Yadav".to_string(),
            email: "hardik@example.com".to_string(),
            mobile_number: "9876543210".to_string(),
            account: None,
        }
    }

    #[test]
    fn valid_customer_passes() {
        assert!(validate_customer(&valid_details()).is_ok());
    }

    #[test]
    fn mobile_number_accepts_empty_and_ten_digits_only() {
        assert!(validate_mobile_number_param("").is_ok());
        assert!(validate_mobile_number_param("9876543210").is_ok());
        assert!(validate_mobile_number_param("12345").is_err());
        assert!(validate_mobile_number_param("12345678901").is_err());
        assert!(validate_mobile_number_param("12345abcde").is_err());
    }

    #[test]
    fn create_payload_accepts_empty_mobile_number() {
        let mut details = valid_details();
        details.mobile_number = String::new();
        assert!(validate_customer(&details).is_ok());
    }

    #[test]
    fn short_name_is_rejected() {
        let mut details = valid_details();
        details.name = "Ann".to_string();
        let err = validate_customer(&details).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "name");
    }

    #[test]
    fn name_longer_than_thirty_chars_is_rejected() {
        let mut details = valid_details();
        details.name = "a".repeat(31);
        assert!(validate_customer(&details).is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut details = valid_details();
        details.email = "not-an-email".to_string();
        let err = validate_customer(&details).unwrap_err();
        assert_eq!(err.violations[0].field, "email");
    }

    #[test]
    fn all_violations_are_reported_together() {
        let details = CustomerDetails {
            name: "Bob".to_string(),
            email: "bad".to_string(),
            mobile_number: "123".to_string(),
            account: None,
        };
        let err = validate_customer(&details).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "email", "mobileNumber"]);
    }

    #[test]
    fn update_requires_embedded_account() {
        let err = validate_customer_update(&valid_details()).unwrap_err();
        assert_eq!(err.violations[0].field, "accountDetails");
    }

    #[test]
    fn update_rejects_malformed_account_fields() {
        let mut details = valid_details();
        details.account = Some(AccountDetails {
            account_number: "12345abcde".to_string(),
            account_type: " ".to_string(),
            branch_address: String::new(),
        });
        let err = validate_customer_update(&details).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["accountNumber", "accountType", "branchAddress"]);
    }

    #[test]
    fn update_accepts_well_formed_account() {
        let mut details = valid_details();
        details.account = Some(AccountDetails {
            account_number: "1234567890".to_string(),
            account_type: "Savings".to_string(),
            branch_address: "Main Branch".to_string(),
        });
        assert!(validate_customer_update(&details).is_ok());
    }
}
