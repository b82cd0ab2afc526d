use crate::utils::error::{Result, SplitError};

/// Smallest number of pizzas whose slices cover `total_slices`.
pub fn pizza_count(total_slices: u32, slices_per_pizza: u32) -> Result<u32> {
    if slices_per_pizza == 0 {
        return Err(SplitError::validation(
            "slices per pizza must be positive to count pizzas",
        ));
    }
    Ok(total_slices.div_ceil(slices_per_pizza))
}

/// One pizza fewer than [`pizza_count`]. `None` when that would mean buying nothing.
pub fn reduced_count(total_slices: u32, slices_per_pizza: u32) -> Result<Option<u32>> {
    let standard = pizza_count(total_slices, slices_per_pizza)?;
    Ok(match standard {
        0 | 1 => None,
        n => Some(n - 1),
    })
}

/// Largest shortfall the reduced plan may leave: a quarter of a large pizza.
pub fn max_reduced_shortfall(large_pizza_slices: u32) -> u32 {
    large_pizza_slices / 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pizza_count_rounds_up() {
        assert_eq!(pizza_count(17, 8).unwrap(), 3);
        assert_eq!(pizza_count(16, 8).unwrap(), 2);
        assert_eq!(pizza_count(1, 8).unwrap(), 1);
        assert_eq!(pizza_count(0, 8).unwrap(), 0);
    }

    #[test]
    fn test_pizza_count_rejects_zero_slices() {
        assert!(pizza_count(10, 0).is_err());
        assert!(reduced_count(10, 0).is_err());
    }

    #[test]
    fn test_reduced_count() {
        assert_eq!(reduced_count(17, 8).unwrap(), Some(2));
        assert_eq!(reduced_count(8, 8).unwrap(), None);
        assert_eq!(reduced_count(0, 8).unwrap(), None);
    }

    #[test]
    fn test_max_reduced_shortfall() {
        assert_eq!(max_reduced_shortfall(8), 2);
        assert_eq!(max_reduced_shortfall(6), 1);
        assert_eq!(max_reduced_shortfall(3), 0);
    }
}
