//! Membership domain for the member database.
//!
//! Defines the [`User`](models::User) record stored for every club member,
//! its validation rules, and the [`UserRepository`](repository::UserRepository)
//! used to read and write the user collection.

pub mod errors;
pub mod models;
pub mod repository;
pub mod validation;

pub use errors::RepositoryError;
pub use models::{
    Chapter, Country, EnteredStatus, Level, MemberStatus, Position, PositionName, User,
};
pub use repository::{DocumentUserRepository, InMemoryUserRepository, UserRepository};
