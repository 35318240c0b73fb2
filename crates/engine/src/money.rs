use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Currency, EngineError};

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (record amounts,
/// report totals) to avoid floating-point drift. Raw store records carry
/// amounts in heterogeneous shapes (JSON number or string); those are
/// converted once at the ingestion boundary via [`Money::from_raw`].
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.format(Currency::Php), "₱12.34");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses an amount from the shapes the document store actually holds.
    ///
    /// Accepted shapes:
    /// - JSON number (integer or float, major units)
    /// - JSON string holding a decimal number (major units)
    ///
    /// Everything else, non-finite values and negative magnitudes are
    /// rejected with [`EngineError::InvalidAmount`]; store records are
    /// unsigned magnitudes, the direction comes from the source collection.
    pub fn from_raw(value: &Value) -> Result<Self, EngineError> {
        let major = match value {
            Value::Number(n) => {
                if let Some(cents) = n.as_i64().and_then(|units| units.checked_mul(100)) {
                    return Self::non_negative(cents);
                }
                n.as_f64()
                    .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(EngineError::InvalidAmount("empty amount".to_string()));
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| EngineError::InvalidAmount(format!("invalid amount: {trimmed}")))?
            }
            other => {
                return Err(EngineError::InvalidAmount(format!(
                    "unsupported amount shape: {other}"
                )));
            }
        };

        if !major.is_finite() {
            return Err(EngineError::InvalidAmount("invalid amount".to_string()));
        }

        let cents = (major * 100.0).round();
        if cents.abs() > i64::MAX as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Self::non_negative(cents as i64)
    }

    fn non_negative(cents: i64) -> Result<Self, EngineError> {
        if cents < 0 {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }
        Ok(Money(cents))
    }

    /// Formats the amount with the currency symbol and exactly two decimals.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        format!("{sign}{}{units}.{cents:02}", currency.symbol())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}
