//! Record store contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the read contract analytics depends on (`RecordStore`).
//! - Define the write contract CRUD flows depend on (`RecordRepository`).
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Time filters are half-open `[start, end)`.
//! - Writes validate records before any SQL mutation.
//! - Reads reject malformed persisted rows instead of masking them.

pub mod record_store;
pub mod sqlite_store;
