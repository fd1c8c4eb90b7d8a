//! Store module
//!
//! HTTP boundary to the remote SQL-execution service. Domain code never sees
//! transport details; it gets a `SqlResponse` or a `StoreError`.

pub mod client;
pub mod error;
pub mod schema;

pub use client::{StoreClient, StoreConfig};
pub use error::StoreError;
pub use schema::{SqlQuery, SqlResponse};
