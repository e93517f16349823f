//! Service layer owning the in-memory todo collection.
//! - Holds all mutable state behind a single lock.
//! - Exposes the list/create/update/delete operations with clear error types.

pub mod errors;
pub mod todos;

pub use errors::ServiceError;
pub use todos::TodoStore;
