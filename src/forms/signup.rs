use serde::Deserialize;

use super::{check_password_pair, max_chars, required_trimmed, FieldErrors};
use crate::db::admin::AdminRepository;
use crate::error::{AppError, AppResult};
use crate::models::Admin;
use crate::password::hash_password;

pub const ADMIN_ID_LEN: usize = 7;
pub const NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;

const ADMIN_ID_TAKEN: &str = "This admin ID has already been registered.";
const EMAIL_TAKEN: &str = "This email address has already been registered.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    pub admin_id: Option<String>,
    pub admin_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

/// Signup fields after trimming and the database-free rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSignup {
    pub admin_id: String,
    pub admin_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn check(&self) -> (Option<CleanSignup>, FieldErrors) {
        let mut errors = FieldErrors::default();

        let admin_id = required_trimmed(&mut errors, "admin_id", "Admin ID", self.admin_id.as_deref());
        if let Some(ref id) = admin_id {
            if id.chars().count() != ADMIN_ID_LEN {
                errors.add("admin_id", format!("Admin ID should contain {} characters.", ADMIN_ID_LEN));
            }
        }

        let admin_name = required_trimmed(&mut errors, "admin_name", "Name", self.admin_name.as_deref());
        if let Some(ref name) = admin_name {
            max_chars(&mut errors, "admin_name", "Name", name, NAME_MAX_LEN);
        }

        let email = required_trimmed(&mut errors, "email", "Email", self.email.as_deref());
        if let Some(ref email) = email {
            if !is_valid_email(email) {
                errors.add("email", "Email is not a valid email address.");
            }
            max_chars(&mut errors, "email", "Email", email, EMAIL_MAX_LEN);
        }

        let password = check_password_pair(&mut errors, self.password.as_deref(), self.password2.as_deref());

        let clean = match (admin_id, admin_name, email, password) {
            (Some(admin_id), Some(admin_name), Some(email), Some(password)) if errors.is_empty() => {
                Some(CleanSignup { admin_id, admin_name, email, password })
            }
            _ => None,
        };
        (clean, errors)
    }

    /// Validate, enforce uniqueness of staff number and email, then create the admin.
    pub async fn signup(&self, admins: &AdminRepository) -> AppResult<Admin> {
        let (clean, mut errors) = self.check();

        if let Some(id) = self.admin_id.as_deref().map(str::trim) {
            if !errors.has("admin_id") && admins.admin_id_taken(id).await? {
                errors.add("admin_id", ADMIN_ID_TAKEN);
            }
        }
        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !errors.has("email") && admins.email_taken(email).await? {
                errors.add("email", EMAIL_TAKEN);
            }
        }

        let clean = match clean {
            Some(clean) if errors.is_empty() => clean,
            _ => return Err(AppError::Validation(errors)),
        };

        let password_hash = hash_password(&clean.password)?;
        let admin = Admin::new(clean.admin_id, clean.admin_name, clean.email, password_hash);
        let admin = match admins.create(&admin).await {
            Ok(admin) => admin,
            // A concurrent signup can take the staff number or email between the probe and the insert.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                let mut errors = FieldErrors::default();
                let (field, message) = unique_violation_field(e.constraint());
                errors.add(field, message);
                tracing::warn!("Signup lost a race on {}: {}", field, e);
                return Err(AppError::Validation(errors));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!("Registered admin {} ({})", admin.admin_id, admin.id);
        Ok(admin)
    }
}

/// Form field and message for a violated `admins` unique constraint.
fn unique_violation_field(constraint: Option<&str>) -> (&'static str, &'static str) {
    match constraint {
        Some(name) if name.contains("email") => ("email", EMAIL_TAKEN),
        _ => ("admin_id", ADMIN_ID_TAKEN),
    }
}

/// `local@domain.tld` with dot-atom local part and hostname labels.
pub fn is_valid_email(email: &str) -> bool {
    const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local.split('.').all(|atom| {
            !atom.is_empty()
                && atom
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
        });

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}
