use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use vitrine_shared::{AppError, Claims, UserRole};

/// Signed HS256 session token for `user_id`.
pub fn create_access_token(user_id: Uuid, role: UserRole, secret: &str, ttl_secs: i64) -> Result<String, AppError> {
    let claims = Claims::new(user_id, role, ttl_secs);
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("JWT encoding failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_shared::middleware::validate_jwt;

    #[test]
    fn token_carries_subject_and_role() {
        let id = Uuid::now_v7();
        let token = create_access_token(id, UserRole::Admin, "test-secret", 60).unwrap();
        let claims = validate_jwt(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_access_token(Uuid::now_v7(), UserRole::User, "one", 60).unwrap();
        assert!(validate_jwt(&token, "two").is_err());
    }
}
