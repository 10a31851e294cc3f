//! Database repositories
//!
//! Repositories encapsulate data access logic and provide a clean API for
//! business logic to interact with the database.

pub mod account;

pub use account::{AccountRepository, AccountRepositoryError};
