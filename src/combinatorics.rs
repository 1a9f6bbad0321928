//! Counting formulas packaged as numeric values.
//!
//! Every value here only records its parameters; the count itself is computed,
//! with checked arithmetic, when the evaluator asks for it. This lets a
//! combinatorics value sit in an expression like any other operand:
//!
//! ```
//! use combicalc::{combinatorics::Combinations, interpreter::expression::Expression};
//!
//! let mut expr = Expression::parse("2 * ").unwrap();
//! expr.add_numeric(Combinations::new(5, 2)).unwrap();
//! assert_eq!(expr.evaluate().unwrap(), 20);
//! ```

/// Closed-form counting functions over `u64` parameters.
pub mod formulas;
/// The twelvefold way: dispatch over the twelve ball-and-box problems.
pub mod twelvefold;

pub use twelvefold::{Balls, Boxes, Mapping, Twelvefold};

use crate::interpreter::{evaluator::EvalResult, value::Numeric};

macro_rules! counting_value {
    ($(#[$doc:meta])* $name:ident, $symbol:literal, $formula:path) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            /// Size of the set drawn from.
            pub n: u32,
            /// Size of the selection.
            pub k: u32,
        }

        impl $name {
            /// Records `n` and `k`; the count is computed on evaluation.
            #[must_use]
            pub const fn new(n: u32, k: u32) -> Self {
                Self { n, k }
            }
        }

        impl Numeric for $name {
            fn eval(&self) -> EvalResult<i64> {
                $formula(u64::from(self.n), u64::from(self.k))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({}, {})", $symbol, self.n, self.k)
            }
        }
    };
}

counting_value!(
    /// `k`-element subsets of an `n`-element set.
    Combinations, "C", formulas::binomial
);
counting_value!(
    /// Ordered selections of `k` distinct elements out of `n`.
    Falling, "P", formulas::falling
);
counting_value!(
    /// `k`-element multisets over `n` kinds.
    Multichoose, "MC", formulas::multichoose
);
counting_value!(
    /// Length-`k` sequences over `n` symbols.
    PermutationsWithRepetition, "PR", formulas::power
);
counting_value!(
    /// Partitions of an `n`-element set into `k` non-empty blocks.
    Stirling2, "S", formulas::stirling2
);
counting_value!(
    /// Partitions of the integer `n` into exactly `k` positive parts.
    Partitions, "p", formulas::partitions
);
