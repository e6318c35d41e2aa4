//! Code snippet sharing API.
//!
//! Snippets can be read by anyone and written only by their owner. Users are
//! read-only over HTTP and are created with the `createuser` command.

use sqlx::SqlitePool;

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod highlight;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod parsers;
pub mod permissions;
pub mod routes;
pub mod serializers;
pub mod utils;

pub use config::Settings;
pub use error::ApiError;

pub struct AppState {
    pub db: SqlitePool,
    pub settings: Settings,
}
