pub mod guard;
pub mod password;
pub mod service;
pub mod session;
pub mod storage;
pub mod token;

pub use guard::{Access, GuardDecision, RouteGuard};
pub use service::{AuthGrant, AuthService, LoginRequest, RegisterRequest, SessionUser, UserAccount};
pub use session::{Session, TOKEN_KEY, USER_KEY};
pub use storage::{KeyValueStorage, MemoryStorage};
