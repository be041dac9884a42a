pub mod aggregation;
pub mod category;
pub mod colors;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod interval;
pub mod messages;
pub mod schema;
pub mod time_math;
pub mod timer;
pub mod view;
