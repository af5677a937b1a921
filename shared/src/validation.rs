//! Input validation functions
//!
//! Hand-written checks for single values plus helpers that turn
//! `validator` derive failures and backend field-error maps into
//! user-facing messages.

use crate::errors::FormError;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Email pattern unavailable: {}", e))?;
    if !email_regex.is_match(email) {
        return Err("Enter a valid email address".to_string());
    }
    Ok(())
}

/// Validate password strength for registration
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a username (letters, digits and @/./+/-/_ only)
pub fn validate_username(username: &str) -> Result<(), String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username is required".to_string());
    }
    if trimmed.len() > 150 {
        return Err("Username too long".to_string());
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err("Username may only contain letters, digits and @/./+/-/_".to_string());
    }
    Ok(())
}

/// Validate a single water intake amount (ml)
pub fn validate_water_amount(amount_ml: u32) -> Result<(), String> {
    if amount_ml == 0 {
        return Err("Amount must be greater than zero".to_string());
    }
    if amount_ml > 10_000 {
        return Err("Amount must be at most 10000 ml".to_string());
    }
    Ok(())
}

// ============================================================================
// Profile Validation
// ============================================================================

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if !(50.0..=300.0).contains(&height_cm) {
        return Err("Height must be between 50 and 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if !(1..=150).contains(&age) {
        return Err("Age must be between 1 and 150".to_string());
    }
    Ok(())
}

// ============================================================================
// Derive Adapters
// ============================================================================
// Used as `#[validate(custom(function = ...))]` on the request types.
// Numeric fields arrive by value, text fields by reference.

fn rule(check: Result<(), String>, code: &'static str) -> Result<(), ValidationError> {
    check.map_err(|message| {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    })
}

pub fn username_rule(username: &str) -> Result<(), ValidationError> {
    rule(validate_username(username), "username")
}

pub fn email_rule(email: &str) -> Result<(), ValidationError> {
    rule(validate_email(email), "email")
}

pub fn password_rule(password: &str) -> Result<(), ValidationError> {
    rule(validate_password(password), "password")
}

pub fn water_amount_rule(amount_ml: u32) -> Result<(), ValidationError> {
    rule(validate_water_amount(amount_ml), "amount")
}

pub fn weight_rule(weight_kg: f64) -> Result<(), ValidationError> {
    rule(validate_weight(weight_kg), "weight")
}

pub fn height_rule(height_cm: f64) -> Result<(), ValidationError> {
    rule(validate_height_cm(height_cm), "height")
}

pub fn age_rule(age: u32) -> Result<(), ValidationError> {
    rule(validate_age(age), "age")
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map wire field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "username" => "Username",
        "email" => "Email",
        "password" => "Password",
        "password2" => "Confirm Password",
        "first_name" => "First Name",
        "last_name" => "Last Name",
        "age" => "Age",
        "weight" => "Weight",
        "height" => "Height",
        "gender" => "Gender",
        "daily_calorie_goal" => "Daily Calorie Goal",
        "daily_water_goal" => "Daily Water Goal",
        "topic" => "Topic",
        "category" => "Category",
        "meal_type" => "Meal Type",
        "amount" => "Amount",
        "calories_burned" => "Calories per Set",
        "rest_time" => "Rest Time",
        "workout_plan" => "Workout Plan",
        "non_field_errors" => "Error",
        _ => field_name,
    }
}

/// Turn derive-validation failures into a single form error
///
/// Fields are reported in name order so messages are stable.
pub fn form_error(errors: &ValidationErrors) -> FormError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.clone(), message)
            })
        })
        .collect();
    fields.sort();

    if fields.len() == 1 {
        let (field, message) = fields.remove(0);
        return FormError::Field {
            label: get_field_display_label(&field).to_string(),
            field,
            message,
        };
    }

    FormError::Many(
        fields
            .into_iter()
            .map(|(field, message)| format!("{}: {}", get_field_display_label(&field), message))
            .collect(),
    )
}

/// Flatten a backend field-error map (`{"field": ["msg", ...]}`) into messages
///
/// Keys are emitted in the order the object holds them. Non-object values
/// yield an empty list.
pub fn flatten_field_errors(body: &Value) -> Vec<String> {
    let Some(map) = body.as_object() else {
        return Vec::new();
    };

    map.iter()
        .flat_map(|(field, value)| {
            let label = get_field_display_label(field).to_string();
            let messages: Vec<String> = match value {
                Value::Array(items) => items.iter().map(value_text).collect(),
                other => vec![value_text(other)],
            };
            messages.into_iter().map(move |message| {
                if field == "non_field_errors" || field == "detail" || field == "error" {
                    message
                } else {
                    format!("{}: {}", label, message)
                }
            })
        })
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProfileUpdate, RegisterRequest};
    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::Fake;
    use proptest::prelude::*;
    use serde_json::json;
    use validator::Validate;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct-horse").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("sam.lee+1").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_validate_water_amount() {
        assert!(validate_water_amount(250).is_ok());
        assert!(validate_water_amount(0).is_err());
        assert!(validate_water_amount(10_001).is_err());
    }

    #[test]
    fn test_validate_profile_values() {
        assert!(validate_weight(70.0).is_ok());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_height_cm(175.0).is_ok());
        assert!(validate_height_cm(20.0).is_err());
        assert!(validate_age(30).is_ok());
        assert!(validate_age(0).is_err());
    }

    #[test]
    fn test_rules_carry_messages() {
        let error = username_rule("bad name").unwrap_err();
        assert_eq!(error.code, "username");
        assert_eq!(
            error.message.as_deref(),
            Some("Username may only contain letters, digits and @/./+/-/_")
        );
        assert!(water_amount_rule(250).is_ok());
        assert!(age_rule(0).is_err());
    }

    #[test]
    fn test_profile_update_uses_profile_checks() {
        let update = ProfileUpdate {
            weight: Some(10.0),
            ..ProfileUpdate::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(
            form_error(&errors).to_string(),
            "Weight: Weight must be at least 20 kg"
        );

        let update = ProfileUpdate {
            age: Some(30),
            height: Some(175.0),
            ..ProfileUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_generated_accounts_pass_registration_rules() {
        for _ in 0..50 {
            let username: String = Username().fake();
            let email: String = SafeEmail().fake();
            assert!(username_rule(&username).is_ok(), "rejected {}", username);
            assert!(email_rule(&email).is_ok(), "rejected {}", email);
        }
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("password2"), "Confirm Password");
        assert_eq!(get_field_display_label("daily_water_goal"), "Daily Water Goal");
        assert_eq!(get_field_display_label("mystery"), "mystery");
    }

    #[test]
    fn test_form_error_single_field() {
        let request = RegisterRequest {
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "long-enough".to_string(),
            password2: "different".to_string(),
            first_name: None,
            last_name: None,
        };
        let errors = request.validate().unwrap_err();
        let error = form_error(&errors);
        assert_eq!(error.to_string(), "Confirm Password: Passwords do not match");
    }

    #[test]
    fn test_form_error_many_fields() {
        let request = RegisterRequest {
            username: "   ".to_string(),
            email: "nope".to_string(),
            password: "long-enough".to_string(),
            password2: "long-enough".to_string(),
            first_name: None,
            last_name: None,
        };
        let errors = request.validate().unwrap_err();
        match form_error(&errors) {
            FormError::Many(messages) => {
                assert_eq!(
                    messages,
                    vec![
                        "Email: Enter a valid email address".to_string(),
                        "Username: Username is required".to_string(),
                    ]
                );
            }
            other => panic!("expected many errors, got {:?}", other),
        }
    }

    #[test]
    fn test_flatten_field_errors() {
        let body = json!({
            "username": ["A user with that username already exists."],
            "password": ["This password is too common.", "This password is entirely numeric."],
            "non_field_errors": ["Passwords do not match"]
        });
        let messages = flatten_field_errors(&body);
        assert!(messages.contains(&"Username: A user with that username already exists.".to_string()));
        assert!(messages.contains(&"Password: This password is entirely numeric.".to_string()));
        assert!(messages.contains(&"Passwords do not match".to_string()));
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn test_flatten_non_object() {
        assert!(flatten_field_errors(&json!("boom")).is_empty());
        assert!(flatten_field_errors(&json!(null)).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_weight_range(weight in 20.0f64..=500.0) {
            prop_assert!(validate_weight(weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_below_min(weight in 0.0f64..20.0) {
            prop_assert!(validate_weight(weight).is_err());
        }

        #[test]
        fn prop_valid_water_amount(amount in 1u32..=10_000) {
            prop_assert!(validate_water_amount(amount).is_ok());
        }
    }
}
