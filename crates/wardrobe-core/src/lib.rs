//! Core types and trait definitions for the OurWardrobe backend.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! donation workflow, the item-status coupling rules and the reconciliation
//! pass are all written against the [`store::WardrobeStore`] abstraction.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod donation;
pub mod error;
pub mod item;
pub mod notification;
pub mod notify;
pub mod reconcile;
pub mod store;
pub mod wardrobe;
pub mod workflow;

pub use error::{Error, ErrorKind, Result};
