//! Large/small pizza combination search.
//!
//! A bounded scan over the number of small pizzas is enough for office-sized
//! orders and keeps the result easy to reason about.

use crate::utils::error::{Result, SplitError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub large: u32,
    pub small: u32,
    /// Purchased minus required slices: positive is surplus, negative is shortfall.
    pub residual: i64,
}

/// Best combination using [`DEFAULT_SEARCH_LIMIT`].
pub fn best_combination(
    total_slices: u32,
    large_pizza_slices: u32,
    small_pizza_slices: u32,
) -> Result<Combination> {
    best_combination_within(
        total_slices,
        large_pizza_slices,
        small_pizza_slices,
        DEFAULT_SEARCH_LIMIT,
    )
}

/// Finds `a` large and `b` small pizzas minimizing `|total - (a*K + b*M)|` for `b` in `0..=limit`.
///
/// Ties keep the earliest `b`, so fewer small pizzas win.
pub fn best_combination_within(
    total_slices: u32,
    large_pizza_slices: u32,
    small_pizza_slices: u32,
    limit: u32,
) -> Result<Combination> {
    if large_pizza_slices == 0 || small_pizza_slices == 0 {
        return Err(SplitError::validation(format!(
            "pizza slice counts must be positive (large: {}, small: {})",
            large_pizza_slices, small_pizza_slices
        )));
    }

    let total = i64::from(total_slices);
    let k = i64::from(large_pizza_slices);
    let m = i64::from(small_pizza_slices);

    let mut best = Combination {
        large: 0,
        small: 0,
        residual: -total,
    };
    let mut best_distance = total;

    for b in 0..=i64::from(limit) {
        let a = ((total - b * m) as f64 / k as f64).round() as i64;
        if a < 0 {
            continue;
        }
        let residual = a * k + b * m - total;
        if residual.abs() < best_distance {
            best_distance = residual.abs();
            best = Combination {
                large: a as u32,
                small: b as u32,
                residual,
            };
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let combo = best_combination(14, 8, 6).unwrap();
        assert_eq!(
            combo,
            Combination {
                large: 1,
                small: 1,
                residual: 0
            }
        );
    }

    #[test]
    fn test_prefers_fewer_small_pizzas_on_tie() {
        // b = 0 gives 16 (-1 off) and b = 3 gives 18 (+1 off); the first one stays.
        let combo = best_combination(17, 8, 6).unwrap();
        assert_eq!(combo.large, 2);
        assert_eq!(combo.small, 0);
        assert_eq!(combo.residual, -1);
    }

    #[test]
    fn test_only_large_when_divisible() {
        let combo = best_combination(24, 8, 6).unwrap();
        assert_eq!((combo.large, combo.small, combo.residual), (3, 0, 0));
    }

    #[test]
    fn test_zero_total() {
        let combo = best_combination(0, 8, 6).unwrap();
        assert_eq!((combo.large, combo.small, combo.residual), (0, 0, 0));
    }

    #[test]
    fn test_search_limit_bounds_small_count() {
        let narrow = best_combination_within(7, 100, 3, 1).unwrap();
        assert_eq!((narrow.large, narrow.small, narrow.residual), (0, 1, -4));

        let wide = best_combination_within(7, 100, 3, DEFAULT_SEARCH_LIMIT).unwrap();
        assert_eq!((wide.large, wide.small, wide.residual), (0, 2, -1));
    }

    #[test]
    fn test_rejects_degenerate_slice_counts() {
        assert!(best_combination(10, 0, 6).is_err());
        assert!(best_combination(10, 8, 0).is_err());
    }
}
