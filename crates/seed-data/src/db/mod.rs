//! Database integration for seeding the member database.
//!
//! The [`Seeder`] clears the user collection and inserts the sample users
//! through any [`UserRepository`](members::repository::UserRepository).

mod seeder;

pub use seeder::{SeedError, Seeder};
