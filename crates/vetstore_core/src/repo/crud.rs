//! Generic CRUD capability shared by entity repositories.
//!
//! # Responsibility
//! - Describe persisted entities by key type, draft type and sort keys.
//! - Define the {create, read, update, delete, count} contract once.
//! - Provide the repository error taxonomy.
//!
//! # Invariants
//! - Misses on read paths are `Ok(None)` / empty vectors, never errors.
//! - Modifications of a missing key fail with `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::veterinarian::VeterinarianValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(VeterinarianValidationError),
    Db(DbError),
    /// No row exists for the given key.
    NotFound {
        entity: &'static str,
        id: String,
    },
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    pub fn not_found<E: Entity>(id: E::Id) -> Self {
        Self::NotFound {
            entity: E::NAME,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<VeterinarianValidationError> for RepoError {
    fn from(value: VeterinarianValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A persisted record type with an identifying key.
pub trait Entity {
    /// Human-readable entity name used in error messages.
    const NAME: &'static str;
    type Id: Copy + Display;
    /// Unsaved form passed to [`CrudRepository::insert`].
    type Draft;
    /// Columns a listing may be ordered by.
    type SortKey: Copy;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K> Sort<K> {
    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Ordering and paging options for [`CrudRepository::find_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<K> {
    /// `None` lists rows by ascending key.
    pub sort: Option<Sort<K>>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl<K> Default for ListQuery<K> {
    fn default() -> Self {
        Self {
            sort: None,
            limit: None,
            offset: 0,
        }
    }
}

impl<K> ListQuery<K> {
    pub fn sorted(sort: Sort<K>) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }
}

/// Create/read/update/delete/count contract over one entity type.
pub trait CrudRepository<E: Entity> {
    /// Validates and stores `draft`, returning the record with its new id.
    fn insert(&self, draft: &E::Draft) -> RepoResult<E>;
    /// Overwrites the row identified by `entity.id()`.
    fn update(&self, entity: &E) -> RepoResult<()>;
    fn find_by_id(&self, id: E::Id) -> RepoResult<Option<E>>;
    fn find_all(&self, query: &ListQuery<E::SortKey>) -> RepoResult<Vec<E>>;
    /// Removes one row; `NotFound` leaves the table untouched.
    fn delete_by_id(&self, id: E::Id) -> RepoResult<()>;
    /// Removes every row and returns how many were removed.
    fn delete_all(&self) -> RepoResult<u64>;
    fn count(&self) -> RepoResult<u64>;

    /// Like [`find_by_id`](Self::find_by_id) but treats absence as `NotFound`.
    fn get_by_id(&self, id: E::Id) -> RepoResult<E> {
        self.find_by_id(id)?.ok_or_else(|| RepoError::not_found::<E>(id))
    }

    fn exists_by_id(&self, id: E::Id) -> RepoResult<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::{ListQuery, Sort, SortDirection};

    #[test]
    fn default_query_has_no_sort_or_paging() {
        let query: ListQuery<u8> = ListQuery::default();
        assert!(query.sort.is_none());
        assert_eq!(query.limit, None);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn sort_constructors_set_direction() {
        assert_eq!(Sort::asc(1_u8).direction, SortDirection::Ascending);
        assert_eq!(Sort::desc(1_u8).direction.as_sql(), "DESC");
    }
}
