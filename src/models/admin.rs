use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const AUTH_KEY_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: i32,
    pub admin_id: String,
    pub admin_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub auth_key: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Admin {
    pub fn new(admin_id: String, admin_name: String, email: String, password_hash: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: 0, // Will be set by database
            admin_id,
            admin_name,
            email,
            password_hash,
            auth_key: generate_auth_key(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Random key used for "remember me" cookies by the login layer.
pub fn generate_auth_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTH_KEY_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_auth_key() {
        let key = generate_auth_key();
        assert_eq!(key.len(), AUTH_KEY_LEN);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(key, generate_auth_key());
    }

    #[test]
    fn test_serialization_hides_secrets() {
        let admin = Admin::new(
            "1234567".to_string(),
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$argon2id$hash".to_string(),
        );
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("auth_key").is_none());
        assert_eq!(json["admin_id"], "1234567");
    }
}
