//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the boundary layer decoupled from storage details.

pub mod account_service;
