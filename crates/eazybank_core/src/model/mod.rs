//! Domain model for customer and account records.
//!
//! # Responsibility
//! - Define canonical entities persisted by core business logic.
//! - Define the transport views exchanged with the boundary layer and the
//!   explicit mapping between the two shapes.
//!
//! # Invariants
//! - Every customer is identified by a stable `CustomerId`.
//! - An account always belongs to exactly one customer.

pub mod account;
pub mod customer;
