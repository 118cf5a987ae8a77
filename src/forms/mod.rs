//! Request forms: field rules, collected per field the way admins see them.

pub mod reset_password;
pub mod room;
pub mod signup;

pub use reset_password::ResetPasswordForm;
pub use room::RoomForm;
pub use signup::SignupForm;

use serde::Serialize;
use std::collections::BTreeMap;

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MISMATCH: &str = "The two passwords do not match.";

/// Field name -> messages. Once a field has a message, later rules for it are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trimmed, non-empty value or a "cannot be blank" message.
pub(crate) fn required_trimmed(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.add(field, format!("{} cannot be blank.", label));
            None
        }
    }
}

/// Non-blank value kept exactly as given; whitespace-only counts as blank.
pub(crate) fn required(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => {
            errors.add(field, format!("{} cannot be blank.", label));
            None
        }
    }
}

pub(crate) fn max_chars(errors: &mut FieldErrors, field: &str, label: &str, value: &str, max: usize) {
    if !errors.has(field) && value.chars().count() > max {
        errors.add(field, format!("{} should contain at most {} characters.", label, max));
    }
}

/// Password plus confirmation, shared by signup and reset.
pub(crate) fn check_password_pair(
    errors: &mut FieldErrors,
    password: Option<&str>,
    password2: Option<&str>,
) -> Option<String> {
    let password = match password {
        Some(p) if !p.trim().is_empty() => Some(p),
        _ => {
            errors.add("password", "Password cannot be blank.");
            None
        }
    };
    let password2 = match password2 {
        Some(p) if !p.trim().is_empty() => Some(p),
        _ => {
            errors.add("password2", "Repeat password cannot be blank.");
            None
        }
    };

    if let Some(p) = password {
        if p.chars().count() < PASSWORD_MIN_LEN {
            errors.add(
                "password",
                format!("Password should contain at least {} characters.", PASSWORD_MIN_LEN),
            );
        }
    }
    if let Some(p2) = password2 {
        if password != Some(p2) {
            errors.add("password2", PASSWORD_MISMATCH);
        }
    }

    if errors.has("password") || errors.has("password2") {
        None
    } else {
        password.map(str::to_string)
    }
}
