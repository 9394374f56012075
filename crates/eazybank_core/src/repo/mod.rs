//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for customer/account
//!   records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Paired customer+account writes are atomic: one transaction covers both
//!   rows or neither.
//! - Repository APIs return semantic read models, never raw rows.

pub mod account_repo;
