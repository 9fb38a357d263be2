use crate::utils::error::{CourseError, Result};
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    if addr.trim().is_empty() {
        return Err(CourseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: "Address cannot be empty".to_string(),
        });
    }

    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| CourseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address (expected host:port): {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CourseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CourseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CourseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(CourseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Request-body check: required text fields must carry something besides whitespace.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CourseError::field(field_name, "This field may not be blank."));
    }
    Ok(())
}

pub fn validate_max_length(field_name: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(CourseError::field(
            field_name,
            format!("Ensure this field has no more than {} characters.", max),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| CourseError::field(field_name, "This field is required."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind", "127.0.0.1:8000").is_ok());
        assert!(validate_socket_addr("server.bind", "0.0.0.0:0").is_ok());
        assert!(validate_socket_addr("server.bind", "").is_err());
        assert!(validate_socket_addr("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_students_per_course", 20, 1).is_ok());
        assert!(validate_positive_number("max_students_per_course", 0, 1).is_err());
    }

    #[test]
    fn test_field_validators_report_field_name() {
        match validate_non_empty_string("name", "   ") {
            Err(CourseError::FieldValidationError { field, .. }) => assert_eq!(field, "name"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(validate_max_length("name", "abc", 3).is_ok());
        assert!(validate_max_length("name", "abcd", 3).is_err());

        let missing: Option<String> = None;
        assert!(validate_required_field("name", &missing).is_err());
    }
}
