//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.
//!
//! Services receive their repositories at construction; transaction scope is
//! chosen by the caller through `db::with_transaction`.

pub mod member_service;
pub mod person_service;
pub mod wise_saying_service;
