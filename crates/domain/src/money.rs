//! Money and charge-line value objects.

use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
///
/// All balance arithmetic in the payment ledger is exact integer math on
/// this type; no floating point ever enters a derived balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents (e.g., 65000 = 650.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Subtracts `other`, flooring at zero.
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money {
            cents: (self.cents - other.cents).max(0),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.cents / 100;
        let frac = (self.cents.abs()) % 100;
        if self.cents < 0 && whole == 0 {
            write!(f, "-0.{frac:02}")
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents - rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// A labelled extra charge attached to a lease or a billing obligation
/// (e.g. service charges, parking, waste collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// Human-readable label shown on the rent call.
    pub label: String,

    /// Amount charged for this line.
    pub amount: Money,

    /// Charge category tag, assigned upstream and treated as opaque here.
    pub kind: String,
}

impl ChargeLine {
    /// Creates a new charge line.
    pub fn new(label: impl Into<String>, amount: Money, kind: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount,
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_from_cents() {
        let money = Money::from_cents(65000);
        assert_eq!(money.cents(), 65000);
        assert!(money.is_positive());
    }

    #[test]
    fn money_arithmetic_is_exact_integer_math() {
        let a = Money::from_cents(85000);
        let b = Money::from_cents(50000);

        assert_eq!((a + b).cents(), 135000);
        assert_eq!((a - b).cents(), 35000);
        assert_eq!(b.saturating_sub(a).cents(), 0);
    }

    #[test]
    fn money_sum_over_ledger() {
        let payments = [
            Money::from_cents(50000),
            Money::from_cents(35000),
            Money::from_cents(5000),
        ];
        let total: Money = payments.into_iter().sum();
        assert_eq!(total.cents(), 90000);
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(65000).to_string(), "650.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::from_cents(-1234).to_string(), "-12.34");
    }

    #[test]
    fn charge_line_serialization_roundtrip() {
        let line = ChargeLine::new("Service charges", Money::from_cents(12000), "provision");
        let json = serde_json::to_string(&line).unwrap();
        let back: ChargeLine = serde_json::from_str(&json).unwrap();
        assert_eq!(line, back);
    }
}
