//! Domain module
//!
//! Core domain types and business logic. Everything here is an immutable
//! value type with no I/O.

pub mod balance;
pub mod error;
pub mod ledger;
pub mod merchant;
pub mod money;
pub mod payment;

pub use balance::{compute_balance, DEFAULT_CURRENCY};
pub use error::DomainError;
pub use ledger::LedgerEntry;
pub use merchant::Merchant;
pub use money::{Money, MoneyError};
pub use payment::{Payment, PaymentStatus, PaymentTransition, UnknownPaymentStatus};
