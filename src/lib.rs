//! # Tally - personal time tracking
//!
//! Records named time intervals, keeps their derived durations consistent,
//! and turns them into per-category and per-day statistics.
//!
//! ## Features
//!
//! - **Intervals**: a name, a date, start and end clock times, and a category.
//!   An end before the start means the interval ran past midnight.
//! - **Timer**: one running timer at a time, shown live until stopped
//! - **Statistics**: time per category, daily trends, stable chart colors
//! - **Import/Export**: JSON snapshots (also legacy formats), CSV, Excel
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tally::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
