//! Data-access layer for the veterinarian registry.
//! This crate owns persistence of veterinarian records and their invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use crate::config::StoreConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::veterinarian::{
    NewVeterinarian, Veterinarian, VeterinarianId, VeterinarianValidationError,
};
pub use repo::crud::{
    CrudRepository, Entity, ListQuery, RepoError, RepoResult, Sort, SortDirection,
};
pub use repo::veterinarian_repo::{
    SqliteVeterinarianRepository, VeterinarianListQuery, VeterinarianRepository,
    VeterinarianSortKey,
};

/// Minimal health-check API for wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
