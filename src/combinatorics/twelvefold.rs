use super::formulas::{
    binomial, falling, multichoose, partitions, partitions_at_most, power, stirling2,
};
use crate::{
    interpreter::{evaluator::EvalResult, value::Numeric},
    util::num::{add, factorial, mul},
};

/// Whether the balls can be told apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Balls {
    /// Labelled balls.
    Distinct,
    /// Unlabelled balls.
    Identical,
}

/// Whether the boxes can be told apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Boxes {
    /// Labelled boxes.
    Distinct,
    /// Unlabelled boxes.
    Identical,
}

/// The restriction on how balls may be placed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mapping {
    /// No restriction.
    Any,
    /// At most one ball per box.
    Injective,
    /// At least one ball per box.
    Surjective,
}

/// The number of ways to place `k` balls into `n` boxes.
///
/// The twelve combinations of [`Balls`], [`Boxes`] and [`Mapping`] each reduce
/// to one of the closed forms in [`formulas`](super::formulas):
///
/// | balls / boxes         | any                      | injective       | surjective     |
/// |-----------------------|--------------------------|-----------------|----------------|
/// | distinct / distinct   | `n^k`                    | `P(n, k)`       | `n! S(k, n)`   |
/// | identical / distinct  | `C(n + k - 1, k)`        | `C(n, k)`       | `C(k - 1, n - 1)` |
/// | distinct / identical  | `S(k, 0) + ... + S(k, n)`| `[k <= n]`      | `S(k, n)`      |
/// | identical / identical | `p(k + n, n)`            | `[k <= n]`      | `p(k, n)`      |
///
/// # Example
/// ```
/// use combicalc::{
///     combinatorics::{Balls, Boxes, Mapping, Twelvefold},
///     interpreter::value::Numeric,
/// };
///
/// // Three labelled balls onto two labelled boxes, none left empty.
/// let onto = Twelvefold::new(Balls::Distinct, Boxes::Distinct, Mapping::Surjective, 3, 2);
/// assert_eq!(onto.eval().unwrap(), 6);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twelvefold {
    /// Whether the balls are labelled.
    pub balls:   Balls,
    /// Whether the boxes are labelled.
    pub boxes:   Boxes,
    /// How many balls each box may or must hold.
    pub mapping: Mapping,
    /// Number of balls.
    pub k:       u32,
    /// Number of boxes.
    pub n:       u32,
}

impl Twelvefold {
    /// Describes the placement of `k` balls into `n` boxes.
    #[must_use]
    pub const fn new(balls: Balls, boxes: Boxes, mapping: Mapping, k: u32, n: u32) -> Self {
        Self { balls,
               boxes,
               mapping,
               k,
               n }
    }
}

impl Numeric for Twelvefold {
    fn eval(&self) -> EvalResult<i64> {
        let k = u64::from(self.k);
        let n = u64::from(self.n);

        match (self.balls, self.boxes, self.mapping) {
            (Balls::Distinct, Boxes::Distinct, Mapping::Any) => power(n, k),
            (Balls::Distinct, Boxes::Distinct, Mapping::Injective) => falling(n, k),
            (Balls::Distinct, Boxes::Distinct, Mapping::Surjective) => {
                match stirling2(k, n)? {
                    0 => Ok(0),
                    blocks => mul(factorial(i64::from(self.n))?, blocks),
                }
            },

            (Balls::Identical, Boxes::Distinct, Mapping::Any) => multichoose(n, k),
            (Balls::Identical, Boxes::Distinct, Mapping::Injective) => binomial(n, k),
            (Balls::Identical, Boxes::Distinct, Mapping::Surjective) => match (k, n) {
                (0, 0) => Ok(1),
                (0, _) | (_, 0) => Ok(0),
                _ => binomial(k - 1, n - 1),
            },

            (Balls::Distinct, Boxes::Identical, Mapping::Any) => {
                (0..=n.min(k)).try_fold(0, |total, blocks| add(total, stirling2(k, blocks)?))
            },
            (Balls::Distinct | Balls::Identical, Boxes::Identical, Mapping::Injective) => {
                Ok(i64::from(k <= n))
            },
            (Balls::Distinct, Boxes::Identical, Mapping::Surjective) => stirling2(k, n),

            (Balls::Identical, Boxes::Identical, Mapping::Any) => partitions_at_most(k, n),
            (Balls::Identical, Boxes::Identical, Mapping::Surjective) => partitions(k, n),
        }
    }
}

impl std::fmt::Display for Twelvefold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let balls = match self.balls {
            Balls::Distinct => "distinct",
            Balls::Identical => "identical",
        };
        let boxes = match self.boxes {
            Boxes::Distinct => "distinct",
            Boxes::Identical => "identical",
        };
        let mapping = match self.mapping {
            Mapping::Any => "any",
            Mapping::Injective => "injective",
            Mapping::Surjective => "surjective",
        };
        write!(f, "TW({balls} balls, {boxes} boxes, {mapping}; {}, {})", self.k, self.n)
    }
}
