use crate::db::categories::Categories;
use crate::db::intervals::Intervals;
use crate::db::migrations;
use crate::db::timer::TimerSessions;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "tally.db";

/// An open, migrated SQLite database and the stores built on top of it.
///
/// The stores borrow the connection, so everything done through one `Db`
/// sees the same data, including within a transaction.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens `tally.db` in the data directory and applies pending migrations.
    pub fn new() -> Result<Db> {
        let mut db = Self::new_without_migrations()?;
        migrations::init_with_migrations(&mut db.conn)?;
        Ok(db)
    }

    /// Opens the database file as is. Used to inspect the schema version.
    pub fn new_without_migrations() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn = Connection::open(db_file_path)?;
        Ok(Db { conn })
    }

    /// A private, fully migrated in-memory database.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        migrations::MigrationManager::new().run_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    pub fn intervals(&self) -> Intervals<'_> {
        Intervals::new(&self.conn)
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(&self.conn)
    }

    pub fn timer(&self) -> TimerSessions<'_> {
        TimerSessions::new(&self.conn)
    }
}
