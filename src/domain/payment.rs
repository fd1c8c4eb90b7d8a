//! Payment
//!
//! Payment record and its status state machine. Transitions never modify
//! the receiver; each produces a new snapshot, so the previous value stays
//! valid evidence of the prior state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::DomainError;
use super::money::Money;

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Captured,
    Failed,
    /// Terminal. Nothing in this crate transitions into it.
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// True when no transition can leave this status
    pub fn is_terminal(&self) -> bool {
        !PaymentTransition::ALL.iter().any(|t| t.permits(*self))
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown payment status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment status: {0}")]
pub struct UnknownPaymentStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "authorized" => Ok(Self::Authorized),
            "captured" => Ok(Self::Captured),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// Operations that move a payment between statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentTransition {
    Authorize,
    Capture,
    Fail,
}

impl PaymentTransition {
    pub const ALL: [PaymentTransition; 3] = [Self::Authorize, Self::Capture, Self::Fail];

    /// Precondition table: the statuses this transition may start from
    pub fn permits(&self, from: PaymentStatus) -> bool {
        use PaymentStatus::*;

        matches!(
            (self, from),
            (Self::Authorize, Pending)
                | (Self::Capture, Authorized)
                | (Self::Fail, Pending | Authorized)
        )
    }

    /// Status a payment holds after this transition succeeds
    pub fn target(&self) -> PaymentStatus {
        match self {
            Self::Authorize => PaymentStatus::Authorized,
            Self::Capture => PaymentStatus::Captured,
            Self::Fail => PaymentStatus::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::Capture => "capture",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for PaymentTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment snapshot
///
/// `amount` is fixed at creation and carried unchanged through every
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: Uuid,
    merchant_id: Uuid,
    amount: Money,
    status: PaymentStatus,
}

impl Payment {
    /// Create a new pending payment
    pub fn new(id: Uuid, merchant_id: Uuid, amount: Money) -> Self {
        Self::restore(id, merchant_id, amount, PaymentStatus::Pending)
    }

    /// Rebuild a snapshot in a known status (e.g. read back from the store)
    pub fn restore(id: Uuid, merchant_id: Uuid, amount: Money, status: PaymentStatus) -> Self {
        Self {
            id,
            merchant_id,
            amount,
            status,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn merchant_id(&self) -> Uuid {
        self.merchant_id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// pending -> authorized
    pub fn authorize(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentTransition::Authorize)
    }

    /// authorized -> captured
    pub fn capture(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentTransition::Capture)
    }

    /// pending | authorized -> failed
    pub fn fail(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentTransition::Fail)
    }

    /// Apply a transition, returning the new snapshot.
    ///
    /// # Errors
    /// `DomainError::InvalidTransition` if the current status does not
    /// satisfy the transition's precondition.
    pub fn transition(&self, transition: PaymentTransition) -> Result<Payment, DomainError> {
        if !transition.permits(self.status) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                transition,
            });
        }

        Ok(Self {
            status: transition.target(),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(status: PaymentStatus) -> Payment {
        Payment::restore(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Money::new(1000, "KES").unwrap(),
            status,
        )
    }

    fn assert_invalid(result: Result<Payment, DomainError>) {
        assert!(
            matches!(result, Err(DomainError::InvalidTransition { .. })),
            "expected InvalidTransition, got {result:?}"
        );
    }

    #[test]
    fn test_new_payment_is_pending() {
        let p = Payment::new(Uuid::new_v4(), Uuid::new_v4(), Money::new(1, "KES").unwrap());
        assert_eq!(p.status(), PaymentStatus::Pending);
    }

    #[test]
    fn test_authorize_transition() {
        let pending = payment(PaymentStatus::Pending);
        let authorized = pending.authorize().unwrap();

        assert_eq!(authorized.status(), PaymentStatus::Authorized);
        assert_eq!(authorized.id(), pending.id());
        assert_eq!(authorized.merchant_id(), pending.merchant_id());
        assert_eq!(authorized.amount(), pending.amount());
    }

    #[test]
    fn test_prior_snapshot_is_unchanged() {
        let pending = payment(PaymentStatus::Pending);
        let _authorized = pending.authorize().unwrap();

        assert_eq!(pending.status(), PaymentStatus::Pending);
        assert_invalid(pending.capture());
    }

    #[test]
    fn test_capture_transition() {
        let captured = payment(PaymentStatus::Authorized).capture().unwrap();
        assert_eq!(captured.status(), PaymentStatus::Captured);
        assert_invalid(captured.authorize());
    }

    #[test]
    fn test_invalid_capture() {
        assert_invalid(payment(PaymentStatus::Pending).capture());
    }

    #[test]
    fn test_fail_from_pending_and_authorized() {
        for status in [PaymentStatus::Pending, PaymentStatus::Authorized] {
            let failed = payment(status).fail().unwrap();
            assert_eq!(failed.status(), PaymentStatus::Failed);
        }
    }

    #[test]
    fn test_fail_rejected_from_finished_states() {
        for status in [
            PaymentStatus::Captured,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            assert_invalid(payment(status).fail());
        }
    }

    #[test]
    fn test_full_transition_table() {
        use PaymentStatus::*;
        use PaymentTransition::*;

        let allowed = [
            (Pending, Authorize),
            (Authorized, Capture),
            (Pending, Fail),
            (Authorized, Fail),
        ];

        for from in [Pending, Authorized, Captured, Failed, Refunded] {
            for transition in PaymentTransition::ALL {
                let result = payment(from).transition(transition);
                if allowed.contains(&(from, transition)) {
                    assert_eq!(result.unwrap().status(), transition.target());
                } else {
                    assert_eq!(
                        result,
                        Err(DomainError::InvalidTransition { from, transition })
                    );
                }
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Authorized.is_terminal());
        assert!(PaymentStatus::Captured.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Refunded.is_terminal());
    }

    #[test]
    fn test_status_string_forms() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Authorized,
            PaymentStatus::Captured,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
        }

        assert!("settled".parse::<PaymentStatus>().is_err());
    }
}
