//! Veterinarian domain model.
//!
//! # Responsibility
//! - Define the persisted record and its unsaved draft form.
//! - Provide the write-path validation applied before persistence.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `name` is never blank on write.
//! - `email` is free text; neither its format nor uniqueness is enforced.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of a veterinarian row.
pub type VeterinarianId = i64;

/// Persisted veterinarian record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veterinarian {
    pub id: VeterinarianId,
    pub name: String,
    pub email: String,
}

/// Veterinarian that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVeterinarian {
    pub name: String,
    pub email: String,
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VeterinarianValidationError {
    /// `name` is empty or whitespace only.
    EmptyName,
}

impl Display for VeterinarianValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "veterinarian name must not be blank"),
        }
    }
}

impl Error for VeterinarianValidationError {}

impl NewVeterinarian {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), VeterinarianValidationError> {
        validate_name(&self.name)
    }

    /// Attaches the store-assigned id.
    pub fn into_stored(self, id: VeterinarianId) -> Veterinarian {
        Veterinarian {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

impl Veterinarian {
    pub fn validate(&self) -> Result<(), VeterinarianValidationError> {
        validate_name(&self.name)
    }

    /// Returns whether `fragment` occurs in the name (case-sensitive).
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.contains(fragment)
    }
}

fn validate_name(name: &str) -> Result<(), VeterinarianValidationError> {
    if name.trim().is_empty() {
        return Err(VeterinarianValidationError::EmptyName);
    }
    Ok(())
}
