//! Terminal user interface for managing a shop's items, their sizes and
//! prices, backed by a hosted realtime database.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod store;
pub mod ui;
pub mod utils;
