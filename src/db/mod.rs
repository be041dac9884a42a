//! SQLite persistence for intervals, categories and the running timer.
//!
//! [`db::Db`] owns the connection and hands out borrowing stores:
//!
//! ```rust,no_run
//! use tally::db::db::Db;
//! use tally::db::store::Store;
//!
//! let db = Db::new()?;
//! for interval in db.intervals().list_all()? {
//!     println!("{} {}", interval.date, interval.name);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod categories;
pub mod db;
pub mod intervals;
pub mod migrations;
pub mod store;
pub mod timer;
