//! Fintech Core Library
//!
//! Money, payments and ledger aggregation, plus the HTTP boundary to the
//! remote SQL store.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod store;

pub use config::{Config, ConfigError};
pub use domain::{
    compute_balance, DomainError, LedgerEntry, Merchant, Money, MoneyError, Payment,
    PaymentStatus,
};
pub use error::{AppError, AppResult};
pub use store::{SqlQuery, SqlResponse, StoreClient, StoreConfig, StoreError};
