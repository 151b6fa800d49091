//! Reusable field rules
//!
//! Rules run after a field has been coerced to its declared type. Each rule
//! checks one constraint and passes values of a type it does not handle, so a
//! field can stack several rules and report every one it violates.

use super::schema::FieldValue;

/// Validator: text must not be blank
pub fn non_empty(
    message: &'static str,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| match value {
        FieldValue::Text(s) if s.trim().is_empty() => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: number must be strictly greater than zero
pub fn positive() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &FieldValue| match value {
        FieldValue::Number(n) if *n <= 0.0 => Err("Number must be greater than 0".to_string()),
        _ => Ok(()),
    }
}

/// Validator: number must be at least `min`
pub fn min_value(min: f64) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| match value {
        FieldValue::Number(n) if *n < min => Err(format!(
            "Number must be greater than or equal to {}",
            min
        )),
        _ => Ok(()),
    }
}

/// Validator: number must be at most `max`
pub fn max_value(max: f64) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| match value {
        FieldValue::Number(n) if *n > max => {
            Err(format!("Number must be less than or equal to {}", max))
        }
        _ => Ok(()),
    }
}

/// Validator: text must be one of the allowed values
pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| match value {
        FieldValue::Text(s) if !allowed.contains(&s.as_str()) => Err(message.to_string()),
        _ => Ok(()),
    }
}
