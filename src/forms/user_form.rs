//! User registration form: fields, initial values and validation rules

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::state::{FieldValue, FormField, FormState, FormValues};
use crate::validation::{common, Check, RuleSpec, ValidationRules};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const GENDER: &str = "gender";
pub const AGE: &str = "age";
pub const ADDRESS: &str = "address";
pub const SUBSCRIPTION: &str = "subscription";

/// One entry of a select field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const GENDER_OPTIONS: [SelectOption; 4] = [
    SelectOption {
        value: "",
        label: "Select Gender",
    },
    SelectOption {
        value: "male",
        label: "Male",
    },
    SelectOption {
        value: "female",
        label: "Female",
    },
    SelectOption {
        value: "other",
        label: "Other",
    },
];

pub const SUBSCRIPTION_OPTIONS: [SelectOption; 3] = [
    SelectOption {
        value: "basic",
        label: "Basic",
    },
    SelectOption {
        value: "premium",
        label: "Premium",
    },
    SelectOption {
        value: "enterprise",
        label: "Enterprise",
    },
];

/// Whether the form creates a new user or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Create New User",
            FormMode::Edit => "Edit User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create User",
            FormMode::Edit => "Update User",
        }
    }

    pub fn submitting_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Creating User...",
            FormMode::Edit => "Updating User...",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            FormMode::Create => "User created successfully!",
            FormMode::Edit => "User updated successfully!",
        }
    }
}

/// Field descriptors in display order
pub fn fields() -> Vec<FormField> {
    vec![
        FormField::input(FIRST_NAME, "First Name", true).with_placeholder("Enter first name"),
        FormField::input(LAST_NAME, "Last Name", true).with_placeholder("Enter last name"),
        FormField::input(EMAIL, "Email Address", true).with_placeholder("Enter email address"),
        FormField::input(PHONE, "Phone Number", true).with_placeholder("Enter phone number"),
        FormField::select(GENDER, "Gender", true),
        FormField::input(AGE, "Age", true).with_placeholder("Enter age"),
        FormField::select(SUBSCRIPTION, "Subscription Plan", false),
        FormField::text_area(ADDRESS, "Address", true)
            .with_placeholder("Enter your complete address"),
    ]
}

/// Options for a select field, if the field is one
pub fn options(field: &str) -> Option<&'static [SelectOption]> {
    match field {
        GENDER => Some(&GENDER_OPTIONS[..]),
        SUBSCRIPTION => Some(&SUBSCRIPTION_OPTIONS[..]),
        _ => None,
    }
}

pub fn initial_values() -> FormValues {
    [
        (FIRST_NAME, ""),
        (LAST_NAME, ""),
        (EMAIL, ""),
        (PHONE, ""),
        (GENDER, ""),
        (AGE, ""),
        (ADDRESS, ""),
        (SUBSCRIPTION, "basic"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), FieldValue::text(value)))
    .collect()
}

pub fn validation_rules() -> ValidationRules {
    RuleSpec::new()
        .field(FIRST_NAME, common::name())
        .field(LAST_NAME, common::name())
        .field(EMAIL, common::email())
        .field(PHONE, common::phone())
        .field(
            GENDER,
            vec![Check::custom(|value, _| {
                if value.is_empty() {
                    "Please select gender".to_string()
                } else {
                    String::new()
                }
            })],
        )
        .field(AGE, vec![Check::custom(check_age)])
        .field(ADDRESS, vec![Check::custom(check_address)])
        .compose()
}

/// Out-of-range numbers fail; text that is not a number is let through
fn check_age(value: &str, _: &FormValues) -> String {
    if value.is_empty() {
        return "Age is required".to_string();
    }
    let trimmed = value.trim();
    let age = if trimmed.is_empty() {
        0.0
    } else {
        match trimmed.parse::<f64>() {
            Ok(age) if !age.is_nan() => age,
            _ => return String::new(),
        }
    };
    if !(1.0..=120.0).contains(&age) {
        "Please enter a valid age (1-120)".to_string()
    } else {
        String::new()
    }
}

// Presence is checked on the raw value, length counts whitespace
fn check_address(value: &str, _: &FormValues) -> String {
    if value.is_empty() {
        "Address is required".to_string()
    } else if value.chars().count() < 10 {
        "Address must be at least 10 characters".to_string()
    } else {
        String::new()
    }
}

/// Start a user form session, optionally prefilled with existing data
pub fn new_form(prefill: Option<&FormValues>) -> Result<FormState, FormError> {
    let mut initial = initial_values();
    if let Some(prefill) = prefill {
        if let Some(unknown) = prefill.keys().find(|name| !initial.contains_key(*name)) {
            return Err(FormError::UnknownField(unknown.clone()));
        }
        initial.extend(prefill.clone());
    }
    Ok(FormState::new(initial, validation_rules()))
}
