//! Domain model for the veterinarian registry.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `VeterinarianId`.
//! - Unsaved records are represented by drafts without an id.

pub mod veterinarian;
