//! Professional accounts: creation, listing and sign-in

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use crate::{
    error::{AppError, AppResult},
    models::professional::{CreateProfessional, Professional, SignIn},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProfessionalsService {
    repository: Repository,
}

impl ProfessionalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Professional>> {
        self.repository.professionals.list().await
    }

    /// Create a professional account (administrator operation)
    pub async fn create(&self, request: CreateProfessional) -> AppResult<Professional> {
        if self
            .repository
            .professionals
            .get_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let professional = self
            .repository
            .professionals
            .create(&request, &password_hash)
            .await?;

        tracing::info!(professional_id = %professional.id, username = %professional.username, "Professional created");
        Ok(professional)
    }

    /// Check credentials and optionally bind the caller's chat.
    ///
    /// Unknown username and wrong password are indistinguishable.
    pub async fn sign_in(&self, request: SignIn) -> AppResult<Professional> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        let professional = self
            .repository
            .professionals
            .get_by_username(&request.username)
            .await?
            .ok_or_else(invalid)?;

        let hash = professional.password_hash.as_deref().ok_or_else(invalid)?;
        if !verify_password(hash, &request.password)? {
            tracing::warn!(username = %request.username, "Failed sign-in attempt");
            return Err(invalid());
        }

        match request.chat_id {
            Some(chat_id) if professional.chat_id != Some(chat_id) => {
                self.repository
                    .professionals
                    .update_chat_id(professional.id, chat_id)
                    .await
            }
            _ => Ok(professional),
        }
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "wrong horse").unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        assert_ne!(hash_password("secret123").unwrap(), hash_password("secret123").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("not-a-hash", "x"),
            Err(AppError::Internal(_))
        ));
    }
}
