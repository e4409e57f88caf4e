//! Route handlers, one module per resource.

pub mod accounts;
pub mod donations;
pub mod items;
pub mod notifications;
