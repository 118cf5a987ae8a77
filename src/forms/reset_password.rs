use serde::Deserialize;

use super::{check_password_pair, FieldErrors};
use crate::db::admin::AdminRepository;
use crate::error::{AppError, AppResult};
use crate::password::hash_password;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetPasswordForm {
    pub password: Option<String>,
    pub password2: Option<String>,
}

impl ResetPasswordForm {
    pub fn check(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        match check_password_pair(&mut errors, self.password.as_deref(), self.password2.as_deref()) {
            Some(password) => Ok(password),
            None => Err(errors),
        }
    }

    /// Replace the password of admin `id`. `Ok(false)` if the row vanished before the update.
    pub async fn reset_password(&self, admins: &AdminRepository, id: i32) -> AppResult<bool> {
        let password = self.check().map_err(AppError::Validation)?;

        if admins.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("admin {}", id)));
        }

        let password_hash = hash_password(&password)?;
        let saved = admins.update_password(id, &password_hash).await?;
        tracing::info!("Password reset for admin {}: saved={}", id, saved);
        Ok(saved)
    }
}
