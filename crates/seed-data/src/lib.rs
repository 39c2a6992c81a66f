//! Development database seeding for the member database.
//!
//! Clears every user from the configured collection and inserts a small,
//! fixed set of sample members: one regular member and one admin holding
//! board positions.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = StoreConfig::load()?;
//! let mut seeder = Seeder::connect(&config)?;
//!
//! seeder.repository().ensure_collection().await?;
//! seeder.clear().await?;
//! seeder.seed().await?;
//! ```

pub mod config;
pub mod db;
pub mod fixtures;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, StoreConfig, StoreSettings};
    pub use crate::db::{SeedError, Seeder};
    pub use crate::fixtures::sample_users;
    pub use members::repository::{DocumentUserRepository, InMemoryUserRepository, UserRepository};
}
