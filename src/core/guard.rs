//! Route guards
//!
//! A guard checks the current [`Session`] before a page renders and
//! produces a decision the routing layer acts on. The protocol is
//! deliberately small: allow, wait for the session sync, or redirect.

use crate::core::session::{Role, Session};

/// Access policy attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Anyone may enter.
    Public,

    /// Any signed-in user, confirmed or provisional.
    Authenticated,

    /// Signed-in user whose effective role is in the list.
    RoleRequired(Vec<Role>),

    /// Confirmed admin only.
    AdminOnly,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the page.
    Allow,

    /// The session is still syncing; render a waiting state and check
    /// again once it settles.
    Wait,

    /// Not signed in. `return_to` carries the destination the user was
    /// trying to reach so the login flow can send them back.
    RedirectToLogin { return_to: Option<String> },

    /// Signed in but not allowed here.
    RedirectHome,
}

impl GuardPolicy {
    /// Check a session against this policy.
    ///
    /// `attempted` is the destination being guarded; it is preserved in
    /// the login redirect so the user returns there after signing in.
    pub fn check(&self, session: &Session, attempted: Option<&str>) -> GuardDecision {
        if matches!(self, GuardPolicy::Public) {
            return GuardDecision::Allow;
        }

        if session.is_syncing() {
            return GuardDecision::Wait;
        }

        let Some(role) = session.effective_role() else {
            return GuardDecision::RedirectToLogin {
                return_to: attempted.map(str::to_string),
            };
        };

        match self {
            GuardPolicy::Public => GuardDecision::Allow,
            GuardPolicy::Authenticated => GuardDecision::Allow,
            GuardPolicy::RoleRequired(allowed) => {
                if allowed.contains(&role) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::RedirectHome
                }
            }
            GuardPolicy::AdminOnly => {
                if role == Role::Admin {
                    GuardDecision::Allow
                } else {
                    GuardDecision::RedirectHome
                }
            }
        }
    }
}
