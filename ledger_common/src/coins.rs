use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;

use crate::op;

/// The grant credited to every account when it is first provisioned.
pub const STARTING_BALANCE: Coins = Coins(1000);

//--------------------------------------       Coins         ---------------------------------------------------------
/// A whole number of ledger coins. There are no fractional amounts.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Coins(i64);

op!(binary Coins, Add, add);
op!(binary Coins, Sub, sub);
op!(inplace Coins, AddAssign, add_assign);
op!(inplace Coins, SubAssign, sub_assign);
op!(unary Coins, Neg, neg);

impl Sum for Coins {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<i64> for Coins {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for Coins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 1 {
            write!(f, "1 coin")
        } else {
            write!(f, "{} coins", self.0)
        }
    }
}

impl Coins {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}
