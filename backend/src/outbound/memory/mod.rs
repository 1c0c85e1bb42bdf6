//! In-process repositories used when no database is configured and by tests.
//!
//! State lives behind a `Mutex`; identifiers are assigned from 1 upwards in
//! insertion order, so "newest first" is descending id just as in
//! PostgreSQL.

mod recipe_repository;
mod user_repository;

pub use recipe_repository::MemoryRecipeRepository;
pub use user_repository::MemoryUserRepository;
