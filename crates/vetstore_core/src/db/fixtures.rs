//! Deterministic seed data for the `veterinarians` table.
//!
//! # Invariants
//! - Seed rows keep fixed ids `1..=3`.
//! - Loading is idempotent: seeded rows are reset to their fixture values.
//! - After loading, newly inserted rows receive ids above the seed range.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{params, Connection};

/// One fixture row with a fixed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedVeterinarian {
    pub id: i64,
    pub name: &'static str,
    pub email: &'static str,
}

/// Rows loaded by [`load_seed_fixtures`].
pub const SEED_VETERINARIANS: &[SeedVeterinarian] = &[
    SeedVeterinarian {
        id: 1,
        name: "Conceição Evaristo",
        email: "conceicao@gmail.com",
    },
    SeedVeterinarian {
        id: 2,
        name: "Carolina Maria de Jesus",
        email: "carolina@gmail.com",
    },
    SeedVeterinarian {
        id: 3,
        name: "Clarice Lispector",
        email: "clarice@gmail.com",
    },
];

/// Inserts the seed set in one transaction and returns the number of rows written.
///
/// # Errors
/// - `FixtureLoad` naming the first seed row that could not be written.
pub fn load_seed_fixtures(conn: &mut Connection) -> DbResult<usize> {
    let tx = conn.transaction()?;
    let mut written = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO veterinarians (id, name, email)
             VALUES (?1, ?2, ?3);",
        )?;
        for seed in SEED_VETERINARIANS {
            written += stmt
                .execute(params![seed.id, seed.name, seed.email])
                .map_err(|source| DbError::FixtureLoad {
                    seed_id: seed.id,
                    source,
                })?;
        }
    }
    tx.commit()?;

    info!("event=fixtures_load module=db status=ok rows={written}");
    Ok(written)
}

/// Looks up a fixture row by id.
pub fn seed_by_id(id: i64) -> Option<&'static SeedVeterinarian> {
    SEED_VETERINARIANS.iter().find(|seed| seed.id == id)
}
