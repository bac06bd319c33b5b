//! Predefined check bundles for common fields

use regex::Regex;
use std::sync::LazyLock;

use super::check::Check;

static PHONE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[\d\s()\-]{10,}$").expect("phone shape pattern is valid")
});

pub fn email() -> Vec<Check> {
    vec![
        Check::required().with_message("Email is required"),
        Check::email().with_message("Please enter a valid email address"),
    ]
}

pub fn password() -> Vec<Check> {
    vec![
        Check::required().with_message("Password is required"),
        Check::min_length(6).with_message("Password must be at least 6 characters"),
    ]
}

pub fn name() -> Vec<Check> {
    vec![
        Check::required().with_message("Name is required"),
        Check::min_length(2).with_message("Name must be at least 2 characters"),
        Check::max_length(50).with_message("Name must be less than 50 characters"),
    ]
}

pub fn phone() -> Vec<Check> {
    vec![
        Check::required().with_message("Phone number is required"),
        Check::pattern(PHONE_SHAPE.clone())
            .with_message("Please enter a valid phone number (min 10 digits)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldValue, FormValues};
    use crate::validation::ValidationRule;

    fn run(checks: Vec<Check>, value: &str) -> String {
        ValidationRule::from_checks(checks).validate(&FieldValue::text(value), &FormValues::new())
    }

    #[test]
    fn test_email_bundle() {
        assert_eq!(run(email(), ""), "Email is required");
        assert_eq!(run(email(), "nope"), "Please enter a valid email address");
        assert_eq!(run(email(), "jane@example.com"), "");
    }

    #[test]
    fn test_password_bundle() {
        assert_eq!(run(password(), ""), "Password is required");
        assert_eq!(run(password(), "abc"), "Password must be at least 6 characters");
        assert_eq!(run(password(), "abcdef"), "");
    }

    #[test]
    fn test_name_bundle_order() {
        assert_eq!(run(name(), "  "), "Name is required");
        assert_eq!(run(name(), "A"), "Name must be at least 2 characters");
        assert_eq!(run(name(), &"x".repeat(51)), "Name must be less than 50 characters");
        assert_eq!(run(name(), "Al"), "");
    }

    #[test]
    fn test_phone_bundle() {
        assert_eq!(run(phone(), ""), "Phone number is required");
        assert_eq!(
            run(phone(), "12345"),
            "Please enter a valid phone number (min 10 digits)"
        );
        assert_eq!(
            run(phone(), "0812-3456-78x"),
            "Please enter a valid phone number (min 10 digits)"
        );
        assert_eq!(run(phone(), "+62 812 3456 7890"), "");
        assert_eq!(run(phone(), "(021) 555-0199"), "");
    }
}
