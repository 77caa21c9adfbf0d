//! Route gate predicates.
//!
//! The routing layer asks these before rendering a page and either waits,
//! renders, or navigates to the returned route.

use serde::{Deserialize, Serialize};

use crate::session::SessionSnapshot;

/// Redirect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// The sign-in page.
    Login,
    /// The signed-in landing page.
    Dashboard,
}

impl Route {
    /// URL path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/auth",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    /// Still loading; render a placeholder.
    Pending,
    /// Render the page.
    Allow,
    /// Navigate elsewhere.
    Redirect(Route),
}

/// Pages that need a signed-in user.
pub fn protected(session: &SessionSnapshot) -> Access {
    if session.loading {
        Access::Pending
    } else if session.is_signed_in() {
        Access::Allow
    } else {
        Access::Redirect(Route::Login)
    }
}

/// Admin pages. `is_admin` is `None` while the role check is in flight.
pub fn admin(session: &SessionSnapshot, is_admin: Option<bool>) -> Access {
    match protected(session) {
        Access::Allow => match is_admin {
            None => Access::Pending,
            Some(true) => Access::Allow,
            Some(false) => Access::Redirect(Route::Dashboard),
        },
        other => other,
    }
}

/// The sign-in page, which signed-in users skip.
pub fn guest(session: &SessionSnapshot) -> Access {
    if session.loading {
        Access::Pending
    } else if session.is_signed_in() {
        Access::Redirect(Route::Dashboard)
    } else {
        Access::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use campushub_core::types::{AuthSession, AuthUser, Persistence, UserId};

    fn signed_in() -> SessionSnapshot {
        SessionSnapshot::settled(Some(AuthSession {
            user: AuthUser {
                uid: UserId::new("uid-123"),
                email: None,
                display_name: None,
                methods: Vec::new(),
            },
            access_token: "t".into(),
            issued_at: Utc::now(),
            expires_at: Utc::now(),
            persistence: Persistence::Local,
        }))
    }

    #[test]
    fn test_protected() {
        assert_eq!(protected(&SessionSnapshot::loading()), Access::Pending);
        assert_eq!(
            protected(&SessionSnapshot::settled(None)),
            Access::Redirect(Route::Login)
        );
        assert_eq!(protected(&signed_in()), Access::Allow);
        assert_eq!(Route::Login.path(), "/auth");
    }

    #[test]
    fn test_admin() {
        let s = signed_in();
        assert_eq!(admin(&s, None), Access::Pending);
        assert_eq!(admin(&s, Some(false)), Access::Redirect(Route::Dashboard));
        assert_eq!(admin(&s, Some(true)), Access::Allow);
        assert_eq!(
            admin(&SessionSnapshot::settled(None), Some(true)),
            Access::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_guest() {
        assert_eq!(guest(&signed_in()), Access::Redirect(Route::Dashboard));
        assert_eq!(guest(&SessionSnapshot::settled(None)), Access::Allow);
    }
}
