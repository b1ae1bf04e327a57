pub mod api;
pub mod config;
pub mod models;
pub mod sheet;
pub mod store;
