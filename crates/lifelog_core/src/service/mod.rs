//! Use-case services over the record repository.
//!
//! # Responsibility
//! - Orchestrate repository calls into entry-level create/complete/log flows.
//! - Keep callers decoupled from storage details.

pub mod entry_service;
