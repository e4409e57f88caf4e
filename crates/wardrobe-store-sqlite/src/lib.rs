//! SQLite backend for the OurWardrobe store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Guarded transitions are single
//! `UPDATE ... WHERE <guard>` statements, so the check and the write cannot
//! interleave with another request.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
