use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use vitrine_shared::{AppError, AppResult, ErrorCode, Latency, UserRole};

use crate::password::{hash_password, validate_password, verify_password};
use crate::token::create_access_token;

// --- Models ---

#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// What the client keeps about the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&UserAccount> for SessionUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthGrant {
    pub token: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

// --- Request DTOs ---

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30, message = "username must be 3 to 30 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub password: String,
}

// --- Service ---

/// Mock auth provider over an owned user directory.
pub struct AuthService {
    users: RwLock<Vec<UserAccount>>,
    jwt_secret: String,
    ttl_secs: i64,
    latency: Latency,
}

impl AuthService {
    pub fn new(jwt_secret: impl Into<String>, ttl_secs: i64, latency: Latency) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            jwt_secret: jwt_secret.into(),
            ttl_secs,
            latency,
        }
    }

    /// Directory with one admin and one regular demo account.
    pub fn with_demo_users(jwt_secret: impl Into<String>, ttl_secs: i64, latency: Latency) -> AppResult<Self> {
        let service = Self::new(jwt_secret, ttl_secs, latency);
        {
            let mut users = service.users.try_write().map_err(|e| AppError::internal(e.to_string()))?;
            users.push(Self::account("admin", "admin@vitrine.test", "admin1234", UserRole::Admin)?);
            users.push(Self::account("demo", "demo@vitrine.test", "demo1234", UserRole::User)?);
        }
        Ok(service)
    }

    fn account(username: &str, email: &str, password: &str, role: UserRole) -> AppResult<UserAccount> {
        Ok(UserAccount {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: email.to_lowercase(),
            password_hash: hash_password(password)?,
            role,
            is_active: true,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    fn grant(&self, account: &UserAccount) -> AppResult<AuthGrant> {
        let token = create_access_token(account.id, account.role, &self.jwt_secret, self.ttl_secs)?;
        Ok(AuthGrant {
            token,
            expires_in: self.ttl_secs,
            user: SessionUser::from(account),
        })
    }

    pub async fn login(&self, req: &LoginRequest) -> AppResult<AuthGrant> {
        self.latency.pause().await;

        let email = req.email.trim().to_lowercase();
        let users = self.users.read().await;
        let account = users
            .iter()
            .find(|u| u.email == email)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials, "invalid email or password"))?;

        if !verify_password(&req.password, &account.password_hash)? {
            return Err(AppError::new(ErrorCode::InvalidCredentials, "invalid email or password"));
        }
        if !account.is_active {
            return Err(AppError::new(ErrorCode::AccountDisabled, "account is disabled"));
        }

        tracing::info!(user_id = %account.id, "user logged in");
        self.grant(account)
    }

    pub async fn register(&self, req: &RegisterRequest) -> AppResult<AuthGrant> {
        req.validate()?;
        validate_password(&req.password)?;

        self.latency.pause().await;

        let email = req.email.trim().to_lowercase();
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::new(ErrorCode::EmailAlreadyExists, "email already registered"));
        }

        let account = Self::account(req.username.trim(), &email, &req.password, UserRole::User)?;
        let grant = self.grant(&account)?;
        tracing::info!(user_id = %account.id, email = %account.email, "user registered");
        users.push(account);

        Ok(grant)
    }

    pub async fn find(&self, id: Uuid) -> Option<SessionUser> {
        self.users.read().await.iter().find(|u| u.id == id).map(SessionUser::from)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> bool {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(account) => {
                account.is_active = active;
                tracing::info!(user_id = %id, active, "account status changed");
                true
            }
            None => false,
        }
    }
}
