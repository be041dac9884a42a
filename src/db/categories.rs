use crate::db::store::Store;
use crate::libs::category::{self, CategoryRecord};
use crate::libs::error::StoreError;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const INSERT_CATEGORY: &str = "INSERT INTO categories (name) VALUES (?1)";
const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?2 WHERE id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const SELECT_ALL_CATEGORIES: &str = "SELECT id, name FROM categories ORDER BY id";
const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name FROM categories WHERE id = ?1";

pub struct Categories<'a> {
    conn: &'a Connection,
}

fn from_row(row: &Row) -> rusqlite::Result<CategoryRecord> {
    Ok(CategoryRecord {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Case-insensitive lookup, also for non-ASCII names.
    pub fn find_by_name(&self, name: &str) -> Result<Option<CategoryRecord>, StoreError> {
        let key = category::name_key(name);
        Ok(self.list_all()?.into_iter().find(|c| c.name_key() == key))
    }

    fn map_unique(&self, name: &str, error: rusqlite::Error) -> StoreError {
        match error.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::DuplicateCategory(name.to_string()),
            _ => StoreError::Sqlite(error),
        }
    }
}

impl Store<CategoryRecord> for Categories<'_> {
    fn list_all(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_ALL_CATEGORIES)?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<CategoryRecord>, StoreError> {
        Ok(self.conn.query_row(SELECT_CATEGORY_BY_ID, params![id], from_row).optional()?)
    }

    /// Trims and validates the name, and rejects a name another category
    /// already has in any letter case.
    fn upsert(&self, record: CategoryRecord) -> Result<CategoryRecord, StoreError> {
        let mut record = category::validate(CategoryRecord {
            id: record.id,
            name: record.name.trim().to_string(),
        })?;

        if let Some(existing) = self.find_by_name(&record.name)? {
            if existing.id != record.id {
                return Err(StoreError::DuplicateCategory(existing.name));
            }
        }

        match record.id {
            None => {
                self.conn
                    .execute(INSERT_CATEGORY, params![record.name])
                    .map_err(|e| self.map_unique(&record.name, e))?;
                record.id = Some(self.conn.last_insert_rowid());
            }
            Some(id) => {
                let affected = self
                    .conn
                    .execute(UPDATE_CATEGORY, params![id, record.name])
                    .map_err(|e| self.map_unique(&record.name, e))?;
                if affected == 0 {
                    return Err(StoreError::NotFound(id));
                }
            }
        }
        Ok(record)
    }

    fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.conn.execute(DELETE_CATEGORY, params![id])? > 0)
    }
}
