use crate::{
    error::RuntimeError,
    interpreter::evaluator::EvalResult,
    util::num::{self, add, mul},
};

fn to_i64(value: u64) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow)
}

fn to_index(value: u64) -> EvalResult<usize> {
    usize::try_from(value).map_err(|_| RuntimeError::Overflow)
}

/// The binomial coefficient `C(n, k)`; `0` when `k > n`.
///
/// Uses the multiplicative formula on the smaller of `k` and `n - k`. Every
/// intermediate value is itself a binomial coefficient no larger than the
/// result, so the computation only fails when the result does not fit.
///
/// # Example
/// ```
/// use combicalc::combinatorics::formulas::binomial;
///
/// assert_eq!(binomial(5, 2).unwrap(), 10);
/// assert_eq!(binomial(2, 5).unwrap(), 0);
/// assert_eq!(binomial(62, 31).unwrap(), 465_428_353_255_261_088);
/// ```
pub fn binomial(n: u64, k: u64) -> EvalResult<i64> {
    if k > n {
        return Ok(0);
    }
    let k = k.min(n - k);

    let mut result: i64 = 1;
    for i in 1..=k {
        let wide = i128::from(result) * i128::from(n - k + i) / i128::from(i);
        result = i64::try_from(wide).map_err(|_| RuntimeError::Overflow)?;
    }
    Ok(result)
}

/// The falling factorial `n (n - 1) ... (n - k + 1)`: ordered selections of
/// `k` out of `n`. `0` when `k > n`.
pub fn falling(n: u64, k: u64) -> EvalResult<i64> {
    if k > n {
        return Ok(0);
    }
    (n - k + 1..=n).try_fold(1, |acc, factor| mul(acc, to_i64(factor)?))
}

/// Multisets of size `k` drawn from `n` kinds: `C(n + k - 1, k)`.
pub fn multichoose(n: u64, k: u64) -> EvalResult<i64> {
    if n == 0 {
        return Ok(i64::from(k == 0));
    }
    binomial(n + k - 1, k)
}

/// Sequences of length `k` over `n` symbols: `n^k`.
pub fn power(n: u64, k: u64) -> EvalResult<i64> {
    num::power(to_i64(n)?, to_i64(k)?)
}

/// Stirling number of the second kind `S(n, k)`: partitions of an `n`-set
/// into `k` non-empty blocks.
///
/// Runs the recurrence `S(j + d, j) = j S(j + d - 1, j) + S(j + d - 1, j - 1)`
/// column by column over `d = 0..=n - k`, so the table has `n - k + 1` cells.
/// Every cell is a lower bound of the result, which means the first cell that
/// overflows ends the computation.
///
/// # Example
/// ```
/// use combicalc::combinatorics::formulas::stirling2;
///
/// assert_eq!(stirling2(4, 2).unwrap(), 7);
/// assert_eq!(stirling2(10, 3).unwrap(), 9330);
/// assert_eq!(stirling2(0, 0).unwrap(), 1);
/// assert_eq!(stirling2(3, 0).unwrap(), 0);
/// ```
pub fn stirling2(n: u64, k: u64) -> EvalResult<i64> {
    if k > n {
        return Ok(0);
    }
    match (k, n - k) {
        (_, 0) => return Ok(1),
        (0, _) => return Ok(0),
        (1, _) => return Ok(1),
        (_, 1) => return binomial(n, 2),
        // S(n, k) >= k^(n - k) >= 2^64
        (_, spread) if spread >= 64 => return Err(RuntimeError::Overflow),
        _ => {},
    }

    let width = to_index(n - k)?;
    let mut column = vec![0i64; width + 1];
    column[0] = 1;

    for j in 1..=k {
        let j = to_i64(j)?;
        for d in 1..=width {
            column[d] = add(mul(j, column[d - 1])?, column[d])?;
        }
    }

    Ok(column[width])
}

/// Partitions of `total` into parts no larger than `max_part`, which is also
/// the number of partitions of `total` into at most `max_part` parts.
///
/// Up to three parts the count has a closed form. From four parts on it is
/// at least `C(total + 3, 3) / 24`, which no longer fits an `i64` once
/// `total` reaches `2^24`; below that a table of `total + 1` cells is filled.
///
/// # Example
/// ```
/// use combicalc::combinatorics::formulas::partitions_at_most;
///
/// assert_eq!(partitions_at_most(5, 5).unwrap(), 7);
/// assert_eq!(partitions_at_most(5, 2).unwrap(), 3);
/// assert_eq!(partitions_at_most(0, 0).unwrap(), 1);
/// assert_eq!(partitions_at_most(u64::from(u32::MAX), 1).unwrap(), 1);
/// ```
pub fn partitions_at_most(total: u64, max_part: u64) -> EvalResult<i64> {
    match max_part.min(total) {
        0 => Ok(i64::from(total == 0)),
        1 => Ok(1),
        2 => to_i64(total / 2 + 1),
        3 => {
            // nearest integer to (total + 3)^2 / 12
            let shifted = u128::from(total) + 3;
            let square = shifted.checked_mul(shifted).ok_or(RuntimeError::Overflow)?;
            let rounded = square / 12 + u128::from(square % 12 >= 6);
            i64::try_from(rounded).map_err(|_| RuntimeError::Overflow)
        },
        _ if total >= 1 << 24 => Err(RuntimeError::Overflow),
        parts => partitions_table(total, parts),
    }
}

fn partitions_table(total: u64, max_part: u64) -> EvalResult<i64> {
    let len = to_index(total)?;
    let mut ways: Vec<i64> = Vec::new();
    ways.try_reserve_exact(len + 1)
        .map_err(|_| RuntimeError::OutOfMemory { cells: len + 1 })?;
    ways.resize(len + 1, 0);
    ways[0] = 1;

    for part in 1..=to_index(max_part)? {
        for j in part..=len {
            ways[j] = add(ways[j], ways[j - part])?;
        }
    }

    Ok(ways[len])
}

/// Partitions of `n` into exactly `k` positive parts.
///
/// # Example
/// ```
/// use combicalc::combinatorics::formulas::partitions;
///
/// assert_eq!(partitions(7, 3).unwrap(), 4);
/// assert_eq!(partitions(3, 5).unwrap(), 0);
/// ```
pub fn partitions(n: u64, k: u64) -> EvalResult<i64> {
    match (n, k) {
        (0, 0) => Ok(1),
        (_, 0) => Ok(0),
        _ if k > n => Ok(0),
        _ => partitions_at_most(n - k, k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_row() {
        let row: Vec<i64> = (0..=6).map(|k| binomial(6, k).unwrap()).collect();
        assert_eq!(row, vec![1, 6, 15, 20, 15, 6, 1]);
    }

    #[test]
    fn binomial_overflows_only_when_the_result_does() {
        assert!(binomial(67, 33).is_err());
        assert_eq!(binomial(1_000_000, 1), Ok(1_000_000));
        assert_eq!(binomial(1_000_000, 999_999), Ok(1_000_000));
    }

    #[test]
    fn falling_factorial() {
        assert_eq!(falling(5, 2), Ok(20));
        assert_eq!(falling(5, 0), Ok(1));
        assert_eq!(falling(5, 6), Ok(0));
        assert_eq!(falling(20, 20), Ok(2_432_902_008_176_640_000));
        assert_eq!(falling(21, 21), Err(RuntimeError::Overflow));
    }

    #[test]
    fn multichoose_values() {
        assert_eq!(multichoose(3, 2), Ok(6));
        assert_eq!(multichoose(0, 0), Ok(1));
        assert_eq!(multichoose(0, 4), Ok(0));
    }

    #[test]
    fn stirling_row() {
        let row: Vec<i64> = (0..=5).map(|k| stirling2(5, k).unwrap()).collect();
        assert_eq!(row, vec![0, 1, 15, 25, 10, 1]);
    }

    #[test]
    fn stirling_near_the_diagonal_does_not_overflow() {
        // S(n, n - 1) = C(n, 2)
        assert_eq!(stirling2(100, 99), Ok(4950));
    }

    #[test]
    fn stirling_at_the_u32_limit() {
        let n = u64::from(u32::MAX);
        assert_eq!(stirling2(n, n - 1), Ok(9_223_372_030_412_324_865));
        assert_eq!(stirling2(n, n), Ok(1));
        assert_eq!(stirling2(n, 1), Ok(1));
        assert_eq!(stirling2(n, 2), Err(RuntimeError::Overflow));
        assert_eq!(stirling2(n, n - 3), Err(RuntimeError::Overflow));
        assert_eq!(stirling2(n, n / 2), Err(RuntimeError::Overflow));
    }

    #[test]
    fn stirling_matches_the_row_recurrence() {
        // S(i, j) = j S(i - 1, j) + S(i - 1, j - 1), built row by row.
        let mut row = vec![1i64];
        for i in 1..=20u64 {
            let mut next = vec![0i64; row.len() + 1];
            for j in 1..=row.len() {
                let above = row.get(j).copied().unwrap_or(0);
                next[j] = j as i64 * above + row[j - 1];
            }
            row = next;
            for (j, expected) in row.iter().enumerate() {
                assert_eq!(stirling2(i, j as u64), Ok(*expected), "S({i}, {j})");
            }
        }
    }

    #[test]
    fn closed_forms_agree_with_the_table() {
        for total in 0..60 {
            for max_part in 0..=3 {
                assert_eq!(partitions_at_most(total, max_part),
                           partitions_table(total, max_part.min(total)),
                           "p({total}, <= {max_part})");
            }
        }
    }

    #[test]
    fn partitions_at_the_u32_limit() {
        let n = u64::from(u32::MAX);
        assert_eq!(partitions_at_most(n, 0), Ok(0));
        assert_eq!(partitions_at_most(n, 1), Ok(1));
        assert_eq!(partitions_at_most(n, 2), Ok(2_147_483_648));
        assert_eq!(partitions_at_most(n, 3), Ok(1_537_228_674_240_785_067));
        assert_eq!(partitions_at_most(n, 4), Err(RuntimeError::Overflow));
        assert_eq!(partitions_at_most(n, n), Err(RuntimeError::Overflow));
        assert_eq!(partitions(n, 1), Ok(1));
        assert_eq!(partitions(n, n), Ok(1));
    }

    #[test]
    fn partitions_exact() {
        let row: Vec<i64> = (0..=6).map(|k| partitions(6, k).unwrap()).collect();
        assert_eq!(row, vec![0, 1, 3, 3, 2, 1, 1]);
        assert_eq!(partitions(0, 0), Ok(1));
    }
}
