use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use vitrine_shared::{AppError, ErrorCode};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AppError::internal(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// At least 8 characters with one letter and one digit.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    let weak = |message: &str| Err(AppError::new(ErrorCode::PasswordTooWeak, message));

    if password.chars().count() < 8 {
        return weak("password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return weak("password must contain at least one number");
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return weak("password must contain at least one letter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("secret123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("secret124", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_internal_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("abc12345").is_ok());
        for weak in ["abc123", "abcdefgh", "12345678"] {
            let err = validate_password(weak).unwrap_err();
            assert_eq!(err.code(), Some(ErrorCode::PasswordTooWeak));
        }
    }
}
