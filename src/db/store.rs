use crate::libs::error::StoreError;

/// CRUD-by-id access to one record collection.
///
/// `upsert` inserts when the record has no id and assigns one; otherwise it
/// replaces the stored record with that id and fails with
/// [`StoreError::NotFound`] if there is none. Ids are never reused.
pub trait Store<T> {
    fn list_all(&self) -> Result<Vec<T>, StoreError>;

    fn get_by_id(&self, id: i64) -> Result<Option<T>, StoreError>;

    fn upsert(&self, record: T) -> Result<T, StoreError>;

    /// Returns whether a record was deleted.
    fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;
}
