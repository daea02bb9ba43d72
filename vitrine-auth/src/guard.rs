use crate::service::SessionUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in user.
    Member,
    AdminOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

impl GuardDecision {
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some("/login"),
            GuardDecision::RedirectHome => Some("/"),
        }
    }
}

/// Path prefix to access level, first match wins; unlisted paths are public.
pub struct RouteGuard {
    rules: Vec<(String, Access)>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
            .rule("/admin", Access::AdminOnly)
            .rule("/dashboard", Access::Member)
            .rule("/settings", Access::Member)
            .rule("/unlock", Access::Member)
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, prefix: impl Into<String>, access: Access) -> Self {
        self.rules.push((prefix.into(), access));
        self
    }

    pub fn access_for(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|(prefix, _)| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .map(|(_, access)| *access)
            .unwrap_or(Access::Public)
    }

    pub fn check(&self, path: &str, user: Option<&SessionUser>) -> GuardDecision {
        let decision = match (self.access_for(path), user) {
            (Access::Public, _) => GuardDecision::Allow,
            (_, None) => GuardDecision::RedirectToLogin,
            (Access::AdminOnly, Some(u)) if !u.is_admin() => GuardDecision::RedirectHome,
            (_, Some(_)) => GuardDecision::Allow,
        };
        if decision != GuardDecision::Allow {
            tracing::debug!(path, ?decision, "route blocked");
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use vitrine_shared::UserRole;

    fn user(role: UserRole) -> SessionUser {
        SessionUser {
            id: Uuid::now_v7(),
            username: "u".into(),
            email: "u@vitrine.test".into(),
            role,
        }
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/admin/profiles", None), GuardDecision::RedirectToLogin);
        assert_eq!(guard.check("/dashboard", None), GuardDecision::RedirectToLogin);
        assert_eq!(guard.check("/browse", None), GuardDecision::Allow);
    }

    #[test]
    fn non_admin_is_sent_home_from_admin_routes() {
        let guard = RouteGuard::default();
        let member = user(UserRole::User);
        assert_eq!(guard.check("/admin", Some(&member)), GuardDecision::RedirectHome);
        assert_eq!(guard.check("/dashboard", Some(&member)), GuardDecision::Allow);
        assert_eq!(GuardDecision::RedirectHome.location(), Some("/"));
    }

    #[test]
    fn admin_passes_everywhere() {
        let guard = RouteGuard::default();
        let admin = user(UserRole::Admin);
        assert_eq!(guard.check("/admin/reviews", Some(&admin)), GuardDecision::Allow);
    }

    #[test]
    fn prefix_matches_whole_segments() {
        let guard = RouteGuard::default();
        assert_eq!(guard.access_for("/administrators"), Access::Public);
        assert_eq!(guard.access_for("/admin/events/3"), Access::AdminOnly);
    }
}
