//! Route protection
//!
//! Decides, for a requested path and whether a session is present, if the
//! request proceeds or is redirected. The CLI maps each command onto one of
//! these paths before running it.

use std::fmt;

use crate::config::RouteSettings;

/// Path prefixes the guard never inspects
const SKIPPED_PREFIXES: [&str; 3] = ["/api", "/_next/static", "/_next/image"];

/// Asset suffix the guard never inspects
const SKIPPED_SUFFIX: &str = ".png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin(String),
    RedirectToDashboard(String),
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::RedirectToLogin(target) | Self::RedirectToDashboard(target) => {
                write!(f, "redirect -> {}", target)
            }
        }
    }
}

/// Static protected/public route tables
#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected: Vec<String>,
    public: Vec<String>,
    login_redirect: String,
    dashboard: String,
}

impl RouteGuard {
    pub fn new(
        protected: Vec<String>,
        public: Vec<String>,
        login_redirect: impl Into<String>,
        dashboard: impl Into<String>,
    ) -> Self {
        Self {
            protected,
            public,
            login_redirect: login_redirect.into(),
            dashboard: dashboard.into(),
        }
    }

    pub fn from_settings(routes: &RouteSettings) -> Self {
        Self::new(
            routes.protected.clone(),
            routes.public.clone(),
            routes.login_redirect.clone(),
            routes.dashboard.clone(),
        )
    }

    /// API routes, framework assets and images bypass the guard
    pub fn is_skipped(path: &str) -> bool {
        SKIPPED_PREFIXES.iter().any(|p| path.starts_with(p)) || path.ends_with(SKIPPED_SUFFIX)
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|p| p == path)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|p| p == path)
    }

    /// Route tables match exact paths only; `/dashboard/x` is neither
    /// protected nor public.
    pub fn evaluate(&self, path: &str, has_session: bool) -> RouteDecision {
        if Self::is_skipped(path) {
            return RouteDecision::Allow;
        }

        if self.is_protected(path) && !has_session {
            log::debug!("no session for protected route {}", path);
            return RouteDecision::RedirectToLogin(self.login_redirect.clone());
        }

        if self.is_public(path) && has_session && !path.starts_with(&self.dashboard) {
            return RouteDecision::RedirectToDashboard(self.dashboard.clone());
        }

        RouteDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::from_settings(&RouteSettings::default())
    }
}
