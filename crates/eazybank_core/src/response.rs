//! Boundary response contract for account operations.
//!
//! # Responsibility
//! - Own the status code and message constants shared with the boundary
//!   layer.
//! - Map operation outcomes to the serializable response envelope.
//!
//! # Invariants
//! - An unconfirmed update/delete always maps to status `417`; the core
//!   never emits `500` for an expected business outcome.

use serde::Serialize;

pub const STATUS_201: &str = "201";
pub const MESSAGE_201: &str = "Account created successfully";
pub const STATUS_200: &str = "200";
pub const MESSAGE_200: &str = "Request processed successfully";
pub const STATUS_417: &str = "417";
pub const MESSAGE_417_UPDATE: &str =
    "Update operation failed. Please try again or contact Dev team";
pub const MESSAGE_417_DELETE: &str =
    "Delete operation failed. Please try again or contact Dev team";

/// Response envelope serialized by the boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: &'static str,
    #[serde(rename = "statusMsg")]
    pub status_message: &'static str,
}

/// Response for a successful create.
pub fn created() -> OperationResponse {
    OperationResponse {
        status_code: STATUS_201,
        status_message: MESSAGE_201,
    }
}

/// Maps the update confirmation flag to its response.
pub fn update_outcome(confirmed: bool) -> OperationResponse {
    if confirmed {
        OperationResponse {
            status_code: STATUS_200,
            status_message: MESSAGE_200,
        }
    } else {
        OperationResponse {
            status_code: STATUS_417,
            status_message: MESSAGE_417_UPDATE,
        }
    }
}

/// Maps the delete confirmation flag to its response.
pub fn delete_outcome(confirmed: bool) -> OperationResponse {
    if confirmed {
        OperationResponse {
            status_code: STATUS_200,
            status_message: MESSAGE_200,
        }
    } else {
        OperationResponse {
            status_code: STATUS_417,
            status_message: MESSAGE_417_DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{created, delete_outcome, update_outcome, STATUS_200, STATUS_201, STATUS_417};

    #[test]
    fn created_uses_201_contract() {
        let response = created();
        assert_eq!(response.status_code, STATUS_201);
        assert_eq!(response.status_message, "Account created successfully");
    }

    #[test]
    fn unconfirmed_outcomes_map_to_417() {
        assert_eq!(update_outcome(false).status_code, STATUS_417);
        assert_eq!(delete_outcome(false).status_code, STATUS_417);
        assert_eq!(update_outcome(true).status_code, STATUS_200);
        assert_eq!(delete_outcome(true).status_code, STATUS_200);
    }

    #[test]
    fn response_serializes_with_external_field_names() {
        let json = serde_json::to_value(created()).unwrap();
        assert_eq!(json["statusCode"], "201");
        assert!(json.get("statusMsg").is_some());
    }
}
