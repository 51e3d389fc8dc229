//! Persistence gateway.
//!
//! Handlers only ever see the [`TodoStore`] and [`UserStore`] trait objects
//! registered as `web::Data`. Two backends implement both traits:
//! [`PgStore`] for PostgreSQL and [`MemoryStore`] for tests and throwaway runs.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::models::{NewUser, Todo, User};
use futures::future::BoxFuture;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<'a, T> = BoxFuture<'a, Result<T, AppError>>;

/// CRUD access to todo rows. Every write is committed before the future resolves.
pub trait TodoStore: Send + Sync {
    /// All todos ordered by id.
    fn list(&self) -> StoreResult<'_, Vec<Todo>>;

    /// Inserts a todo and returns it with its assigned id.
    fn create(&self, description: String) -> StoreResult<'_, Todo>;

    fn get(&self, id: i32) -> StoreResult<'_, Option<Todo>>;

    /// Overwrites the description. `None` when no row has this id.
    fn update(&self, id: i32, description: String) -> StoreResult<'_, Option<Todo>>;

    /// Removes the row. `false` when no row has this id.
    fn delete(&self, id: i32) -> StoreResult<'_, bool>;
}

/// Account storage for the identity routes.
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::BadRequest` when the email is already registered.
    fn create(&self, user: NewUser) -> StoreResult<'_, User>;

    /// Case-insensitive lookup.
    fn find_by_email<'a>(&'a self, email: &'a str) -> StoreResult<'a, Option<User>>;

    fn find_by_id(&self, id: i32) -> StoreResult<'_, Option<User>>;
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::BadRequest(format!("Email '{}' is already taken", email))
}
