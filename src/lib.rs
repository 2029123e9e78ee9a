//! Changeable Server Library
//!
//! Accounts, a per-user autosave blob, and a registry of named designs that
//! can be kept private or shared publicly.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod identity;
pub mod models;
pub mod normalize;
pub mod registry;
pub mod routes;
pub mod security;
pub mod session;
pub mod state_blob;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}
