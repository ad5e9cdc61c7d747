use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------      Kopeks       -----------------------------------------------------------
/// A ruble amount, stored as an integer number of kopeks.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Kopeks(i64);

op!(binary Kopeks, Add, add);
op!(binary Kopeks, Sub, sub);
op!(inplace Kopeks, AddAssign, add_assign);

impl Mul<i64> for Kopeks {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Kopeks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in kopeks: {0}")]
pub struct KopeksConversionError(String);

impl From<i64> for Kopeks {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Kopeks {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Kopeks {}

impl TryFrom<u64> for Kopeks {
    type Error = KopeksConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(KopeksConversionError(format!("Value {} is too large to convert to Kopeks", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Kopeks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{} ₽", self.0 / 100)
        } else {
            let rub = self.0 as f64 / 100.0;
            write!(f, "{rub:0.2} ₽")
        }
    }
}

impl Kopeks {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rubles(rubles: i64) -> Self {
        Self(rubles * 100)
    }
}
