use crate::utils::error::{QuizError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuizError::InvalidConfigValueError {
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
    if !(value >= min && value <= max) {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Tolerances are fractions of the image span: strictly positive, at most 1.
pub fn validate_tolerance(field_name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Tolerance must be greater than 0 and at most 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tolerance() {
        assert!(validate_tolerance("grading.tolerance", 0.04).is_ok());
        assert!(validate_tolerance("grading.tolerance", 1.0).is_ok());
        assert!(validate_tolerance("grading.tolerance", 0.0).is_err());
        assert!(validate_tolerance("grading.tolerance", 1.5).is_err());
        assert!(validate_tolerance("grading.tolerance", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("x", 0.5, 0.0, 1.0).is_ok());
        assert!(validate_range("x", f64::NAN, 0.0, 1.0).is_err());
        assert!(validate_range("x", -0.1, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("catalog.source", "points.csv").is_ok());
        assert!(validate_path("catalog.source", "").is_err());
        assert!(validate_non_empty_string("guess", "  ").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("logging.level", "DEBUG").is_ok());
        assert!(validate_log_level("logging.level", "loud").is_err());
    }
}
