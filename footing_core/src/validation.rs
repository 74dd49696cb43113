//! Assignment-time input checks.
//!
//! Every setter on the footing aggregates validates its arguments with these
//! helpers before touching any state, so a rejected call leaves the aggregate
//! exactly as it was.

use crate::errors::{CalcError, CalcResult};

/// Reject NaN and infinities.
pub(crate) fn finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

pub(crate) fn strictly_positive(field: &str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be greater than zero"));
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(value)
}

pub(crate) fn at_least(field: &str, value: f64, minimum: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value < minimum {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be at least {}", minimum),
        ));
    }
    Ok(value)
}

pub(crate) fn at_most(field: &str, value: f64, maximum: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value > maximum {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value cannot exceed {}", maximum),
        ));
    }
    Ok(value)
}

/// Accept only members of a discrete set.
pub(crate) fn one_of(field: &str, value: f64, allowed: &[f64]) -> CalcResult<f64> {
    finite(field, value)?;
    if allowed.iter().any(|a| (a - value).abs() < 1e-9) {
        Ok(value)
    } else {
        let list: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be one of [{}]", list.join(", ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_rejects_nan() {
        assert!(finite("x", f64::NAN).is_err());
        assert!(finite("x", f64::INFINITY).is_err());
        assert!(finite("x", -3.0).is_ok());
    }

    #[test]
    fn test_bounds() {
        assert!(strictly_positive("x", 0.0).is_err());
        assert!(non_negative("x", 0.0).is_ok());
        assert!(at_least("x", 799.0, 800.0).is_err());
        assert!(at_most("x", 3601.0, 3600.0).is_err());
        assert!(at_most("x", 3600.0, 3600.0).is_ok());
    }

    #[test]
    fn test_one_of() {
        assert!(one_of("fck", 25.0, &[16.0, 20.0, 25.0]).is_ok());
        let err = one_of("fck", 28.0, &[16.0, 20.0, 25.0]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
