//! Veterinarian repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Implement the generic CRUD contract over the `veterinarians` table.
//! - Provide name-fragment and email lookups.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - Read paths return stored rows as-is; `email` is opaque text.
//! - Name search is case-sensitive and treats `%`/`_` literally.
//! - Unsorted results are ordered by `id ASC`.

use crate::db::migrations::latest_version;
use crate::model::veterinarian::{NewVeterinarian, Veterinarian, VeterinarianId};
use crate::repo::crud::{CrudRepository, Entity, ListQuery, RepoError, RepoResult};
use log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const VETERINARIAN_SELECT_SQL: &str = "SELECT
    id,
    name,
    email
FROM veterinarians";

const REQUIRED_COLUMNS: [&str; 3] = ["id", "name", "email"];

/// Columns a veterinarian listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeterinarianSortKey {
    Id,
    Name,
    Email,
}

impl VeterinarianSortKey {
    fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
        }
    }
}

pub type VeterinarianListQuery = ListQuery<VeterinarianSortKey>;

impl Entity for Veterinarian {
    const NAME: &'static str = "veterinarian";
    type Id = VeterinarianId;
    type Draft = NewVeterinarian;
    type SortKey = VeterinarianSortKey;

    fn id(&self) -> VeterinarianId {
        self.id
    }
}

/// Veterinarian-specific queries on top of the generic CRUD contract.
pub trait VeterinarianRepository: CrudRepository<Veterinarian> {
    /// Returns every row whose name contains `fragment`.
    ///
    /// An empty fragment matches every row (`instr(name, '')` is 1).
    fn find_by_name_contains(&self, fragment: &str) -> RepoResult<Vec<Veterinarian>>;
    /// Returns the lowest-id row with exactly this email.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Veterinarian>>;
    /// Removes every row with exactly this email; zero matches is not an error.
    fn delete_by_email(&self, email: &str) -> RepoResult<u64>;
}

/// SQLite-backed veterinarian repository.
pub struct SqliteVeterinarianRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVeterinarianRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for malformed schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CrudRepository<Veterinarian> for SqliteVeterinarianRepository<'_> {
    fn insert(&self, draft: &NewVeterinarian) -> RepoResult<Veterinarian> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO veterinarians (name, email) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.email.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=veterinarian_insert module=repo status=ok id={id}");

        Ok(draft.clone().into_stored(id))
    }

    fn update(&self, entity: &Veterinarian) -> RepoResult<()> {
        entity.validate()?;

        let changed = self.conn.execute(
            "UPDATE veterinarians
             SET
                name = ?1,
                email = ?2
             WHERE id = ?3;",
            params![entity.name.as_str(), entity.email.as_str(), entity.id],
        )?;

        if changed == 0 {
            warn!(
                "event=veterinarian_update module=repo status=not_found id={}",
                entity.id
            );
            return Err(RepoError::not_found::<Veterinarian>(entity.id));
        }

        info!(
            "event=veterinarian_update module=repo status=ok id={}",
            entity.id
        );
        Ok(())
    }

    fn find_by_id(&self, id: VeterinarianId) -> RepoResult<Option<Veterinarian>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VETERINARIAN_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_veterinarian_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self, query: &VeterinarianListQuery) -> RepoResult<Vec<Veterinarian>> {
        let mut sql = String::from(VETERINARIAN_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        match query.sort {
            Some(sort) if sort.key != VeterinarianSortKey::Id => sql.push_str(&format!(
                " ORDER BY {} {}, id ASC",
                sort.key.column(),
                sort.direction.as_sql()
            )),
            Some(sort) => sql.push_str(&format!(" ORDER BY id {}", sort.direction.as_sql())),
            None => sql.push_str(" ORDER BY id ASC"),
        }

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query(params_from_iter(bind_values))?;
        collect_veterinarians(rows)
    }

    fn delete_by_id(&self, id: VeterinarianId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM veterinarians WHERE id = ?1;", [id])?;

        if changed == 0 {
            warn!("event=veterinarian_delete module=repo status=not_found id={id}");
            return Err(RepoError::not_found::<Veterinarian>(id));
        }

        info!("event=veterinarian_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn delete_all(&self) -> RepoResult<u64> {
        let removed = self.conn.execute("DELETE FROM veterinarians;", [])?;
        info!("event=veterinarian_delete_all module=repo status=ok removed={removed}");
        Ok(removed as u64)
    }

    fn count(&self) -> RepoResult<u64> {
        let total: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM veterinarians;", [], |row| row.get(0))?;
        u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{total}`")))
    }
}

impl VeterinarianRepository for SqliteVeterinarianRepository<'_> {
    fn find_by_name_contains(&self, fragment: &str) -> RepoResult<Vec<Veterinarian>> {
        let mut stmt = self.conn.prepare(&format!(
            "{VETERINARIAN_SELECT_SQL}
             WHERE instr(name, ?1) > 0
             ORDER BY id ASC;"
        ))?;
        let rows = stmt.query([fragment])?;
        let hits = collect_veterinarians(rows)?;
        debug!(
            "event=veterinarian_search module=repo status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Veterinarian>> {
        let mut stmt = self.conn.prepare(&format!(
            "{VETERINARIAN_SELECT_SQL}
             WHERE email = ?1
             ORDER BY id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_veterinarian_row(row)?));
        }

        Ok(None)
    }

    fn delete_by_email(&self, email: &str) -> RepoResult<u64> {
        let removed = self
            .conn
            .execute("DELETE FROM veterinarians WHERE email = ?1;", [email])?;
        info!("event=veterinarian_delete module=repo status=ok by=email removed={removed}");
        Ok(removed as u64)
    }
}

fn collect_veterinarians(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Veterinarian>> {
    let mut veterinarians = Vec::new();
    while let Some(row) = rows.next()? {
        veterinarians.push(parse_veterinarian_row(row)?);
    }
    Ok(veterinarians)
}

fn parse_veterinarian_row(row: &Row<'_>) -> RepoResult<Veterinarian> {
    Ok(Veterinarian {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "veterinarians")? {
        return Err(RepoError::MissingRequiredTable("veterinarians"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "veterinarians", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "veterinarians",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
