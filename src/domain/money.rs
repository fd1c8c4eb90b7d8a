//! Money type
//!
//! Domain primitive for monetary values held in minor currency units.
//! Every instance is validated at construction time, so an invalid value
//! cannot exist in the system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency codes are ISO 4217 style: exactly three characters.
const CURRENCY_CODE_LEN: usize = 3;

/// Money represents a non-negative amount in minor units (e.g. cents).
///
/// # Invariants
/// - Amount is never negative
/// - Currency is exactly 3 characters
///
/// Amounts are `i64`; sums beyond `i64::MAX` are rejected with
/// `MoneyError::Overflow` rather than wrapping.
///
/// # Example
/// ```
/// use fintech_core::domain::Money;
///
/// let price = Money::new(1000, "KES").unwrap();
/// let fee = Money::new(50, "KES").unwrap();
/// assert_eq!(price.add(&fee).unwrap().amount(), 1050);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: i64,
    currency: String,
}

/// Errors that can occur when creating or combining Money
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Money amount cannot be negative (got {0})")]
    NegativeAmount(i64),

    #[error("Currency must be a 3 character ISO 4217 code (got {0:?})")]
    InvalidCurrency(String),

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("Money amount exceeds the supported range")]
    Overflow,
}

impl Money {
    /// Create a new Money value with validation.
    ///
    /// # Errors
    /// - `MoneyError::NegativeAmount` if amount < 0
    /// - `MoneyError::InvalidCurrency` if currency is not exactly 3 characters
    pub fn new(amount: i64, currency: impl Into<String>) -> Result<Self, MoneyError> {
        let currency = currency.into();

        if amount < 0 {
            return Err(MoneyError::NegativeAmount(amount));
        }

        if currency.chars().count() != CURRENCY_CODE_LEN {
            return Err(MoneyError::InvalidCurrency(currency));
        }

        Ok(Self { amount, currency })
    }

    /// Zero in the given currency.
    pub fn zero(currency: impl Into<String>) -> Result<Self, MoneyError> {
        Self::new(0, currency)
    }

    /// Amount in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Add two values of the same currency, producing a new value.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }

        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;

        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Unvalidated wire form; deserialization goes through `Money::new`.
#[derive(Deserialize)]
struct RawMoney {
    amount: i64,
    currency: String,
}

impl TryFrom<RawMoney> for Money {
    type Error = MoneyError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.amount, raw.currency)
    }
}
