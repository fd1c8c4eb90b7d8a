//! Balance computation
//!
//! Aggregates ledger entries into a single total.

use std::borrow::Borrow;

use super::error::DomainError;
use super::ledger::LedgerEntry;
use super::money::Money;

/// Currency reported for an empty ledger.
///
/// An empty ledger has no currency of its own; callers that care must check
/// for emptiness before aggregating.
pub const DEFAULT_CURRENCY: &str = "KES";

/// Sum the amounts of `entries` into a single Money value.
///
/// The input is consumed in a single pass, so one-shot iterators work. The
/// first entry fixes the currency; any entry in another currency fails with
/// `DomainError::MixedCurrency`. An empty input yields zero in
/// [`DEFAULT_CURRENCY`].
pub fn compute_balance<I>(entries: I) -> Result<Money, DomainError>
where
    I: IntoIterator,
    I::Item: Borrow<LedgerEntry>,
{
    let mut entries = entries.into_iter();

    let Some(first) = entries.next() else {
        return Ok(Money::zero(DEFAULT_CURRENCY)?);
    };

    let mut total = first.borrow().amount().clone();

    for entry in entries {
        let amount = entry.borrow().amount();
        if amount.currency() != total.currency() {
            return Err(DomainError::mixed_currency(
                total.currency(),
                amount.currency(),
            ));
        }
        total = total.add(amount)?;
    }

    Ok(total)
}
