use vitrine_shared::{AppError, AppResult};

use crate::service::{AuthGrant, AuthService, LoginRequest, RegisterRequest, SessionUser};
use crate::storage::KeyValueStorage;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

/// The signed-in user as seen by the client, backed by a key/value store.
///
/// Built with [`Session::hydrate`]; a token without a readable user record
/// (or the other way round) is wiped and the session starts anonymous.
pub struct Session<S: KeyValueStorage> {
    storage: S,
    token: Option<String>,
    user: Option<SessionUser>,
}

impl<S: KeyValueStorage> Session<S> {
    pub fn hydrate(mut storage: S) -> Self {
        let token = storage.get(TOKEN_KEY);
        let user = storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<SessionUser>(&raw).ok());

        match (token, user) {
            (Some(token), Some(user)) => {
                tracing::debug!(user_id = %user.id, "session restored");
                Self { storage, token: Some(token), user: Some(user) }
            }
            _ => {
                storage.remove(TOKEN_KEY);
                storage.remove(USER_KEY);
                Self { storage, token: None, user: None }
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist a fresh grant.
    pub fn establish(&mut self, grant: &AuthGrant) -> AppResult<()> {
        let user = serde_json::to_string(&grant.user).map_err(serialization_error)?;
        self.storage.set(TOKEN_KEY, grant.token.clone());
        self.storage.set(USER_KEY, user);
        self.token = Some(grant.token.clone());
        self.user = Some(grant.user.clone());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.token = None;
        self.user = None;
    }

    pub async fn login(&mut self, auth: &AuthService, req: &LoginRequest) -> AppResult<SessionUser> {
        let grant = auth.login(req).await?;
        self.establish(&grant)?;
        Ok(grant.user)
    }

    pub async fn register(&mut self, auth: &AuthService, req: &RegisterRequest) -> AppResult<SessionUser> {
        let grant = auth.register(req).await?;
        self.establish(&grant)?;
        Ok(grant.user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!(user_id = %user.id, "user logged out");
        }
        self.clear();
    }
}

fn serialization_error(e: serde_json::Error) -> AppError {
    AppError::internal(format!("session serialization failed: {e}"))
}
