use crate::utils::error::{Result, SplitError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(SplitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Value must be unique".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("large_slices", 8, 1).is_ok());
        assert!(validate_positive_number("large_slices", 0, 1).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("large_price", 800.0).is_ok());
        assert!(validate_amount("large_price", 0.0).is_ok());
        assert!(validate_amount("large_price", -1.0).is_err());
        assert!(validate_amount("large_price", f64::NAN).is_err());
        assert!(validate_amount("large_price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("small_price_percent", 65.0, 0.0, 100.0).is_ok());
        assert!(validate_range("small_price_percent", 100.5, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("participants.id", ["anna", "boris"]).is_ok());
        assert!(validate_unique("participants.id", ["anna", "anna"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("participants.id", "anna").is_ok());
        assert!(validate_non_empty_string("participants.id", "  ").is_err());
    }
}
