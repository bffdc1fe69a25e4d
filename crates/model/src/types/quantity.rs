use std::fmt;
use std::ops::{Add, Sub};

use ledgerflow_core::correctness::{check_non_negative, check_valid_precision};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-point, non-negative amount of a base asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity {
    value: Decimal,
    precision: u8,
}

impl Quantity {
    pub fn new(value: f64, precision: u8) -> anyhow::Result<Self> {
        check_non_negative(value, "value")?;
        check_valid_precision(precision, "precision")?;
        let mut value = Decimal::try_from(value)?;
        value.rescale(precision as u32);
        Ok(Quantity { value, precision })
    }

    pub fn from_decimal(value: Decimal, precision: u8) -> anyhow::Result<Self> {
        check_valid_precision(precision, "precision")?;
        anyhow::ensure!(value >= Decimal::ZERO, "Quantity value must be non-negative: {value}");
        let mut value = value;
        value.rescale(precision as u32);
        Ok(Quantity { value, precision })
    }

    pub fn zero(precision: u8) -> Self {
        Quantity {
            value: Decimal::new(0, precision as u32),
            precision,
        }
    }

    pub fn as_decimal(self) -> Decimal {
        self.value
    }

    pub fn as_f64(self) -> f64 {
        self.value.try_into().unwrap_or(f64::NAN)
    }

    pub fn precision(self) -> u8 {
        self.precision
    }

    pub fn is_zero(self) -> bool {
        self.value.is_zero()
    }

    /// Quantity minus `rhs`, clamped at zero rather than going negative or
    /// erroring; callers that need the error path should check `self >= rhs`
    /// explicitly (as the fill-matching code does).
    pub fn saturating_sub(self, rhs: Quantity) -> Quantity {
        let value = (self.value - rhs.value).max(Decimal::ZERO);
        Quantity {
            value,
            precision: self.precision.max(rhs.precision),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add for Quantity {
    type Output = Quantity;
    fn add(self, rhs: Quantity) -> Quantity {
        Quantity {
            value: self.value + rhs.value,
            precision: self.precision.max(rhs.precision),
        }
    }
}

impl Sub for Quantity {
    type Output = Quantity;
    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity {
            value: self.value - rhs.value,
            precision: self.precision.max(rhs.precision),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_negative() {
        assert!(Quantity::new(-1.0, 2).is_err());
    }

    #[test]
    fn saturating_sub_clamps_at_zero() {
        let a = Quantity::new(1.0, 2).unwrap();
        let b = Quantity::new(2.5, 2).unwrap();
        assert!(a.saturating_sub(b).is_zero());
    }

    #[test]
    fn add_and_sub() {
        let a = Quantity::new(1.5, 2).unwrap();
        let b = Quantity::new(0.5, 2).unwrap();
        assert_eq!((a + b).as_f64(), 2.0);
        assert_eq!((a - b).as_f64(), 1.0);
    }

    #[test]
    fn zero_is_zero() {
        assert!(Quantity::zero(2).is_zero());
    }
}
