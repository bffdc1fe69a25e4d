use std::fmt;
use std::ops::{Add, Sub};

use ledgerflow_core::correctness::{check_non_negative, check_valid_precision};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-point price, carrying the decimal precision it was constructed
/// with. Backed by `rust_decimal::Decimal` rather than a hand-rolled
/// scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    value: Decimal,
    precision: u8,
}

impl Price {
    pub fn new(value: f64, precision: u8) -> anyhow::Result<Self> {
        check_non_negative(value, "value")?;
        check_valid_precision(precision, "precision")?;
        let mut value = Decimal::try_from(value)?;
        value.rescale(precision as u32);
        Ok(Price { value, precision })
    }

    pub fn from_decimal(value: Decimal, precision: u8) -> anyhow::Result<Self> {
        check_valid_precision(precision, "precision")?;
        anyhow::ensure!(value >= Decimal::ZERO, "Price value must be non-negative: {value}");
        let mut value = value;
        value.rescale(precision as u32);
        Ok(Price { value, precision })
    }

    pub fn zero(precision: u8) -> Self {
        Price {
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
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add for Price {
    type Output = Price;
    fn add(self, rhs: Price) -> Price {
        Price {
            value: self.value + rhs.value,
            precision: self.precision.max(rhs.precision),
        }
    }
}

impl Sub for Price {
    type Output = Price;
    fn sub(self, rhs: Price) -> Price {
        Price {
            value: self.value - rhs.value,
            precision: self.precision.max(rhs.precision),
        }
    }
}
