//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic CRUD contract and its error taxonomy.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository writes validate entities before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod crud;
pub mod veterinarian_repo;
