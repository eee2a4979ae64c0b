//! Session lifecycle for lessonhub
//!
//! The session is an explicit state machine rather than ambient global
//! state. After a provider sign-in the session is `Syncing` until the
//! backend profile fetch resolves:
//! - success yields `Authenticated { confirmed: true }`
//! - failure yields `Authenticated { confirmed: false }` carrying a
//!   profile derived from the provider identity
//!
//! An unconfirmed session keeps the user visibly signed in (the backend
//! record may still be settling right after registration) but is never
//! trusted with elevated access: [`Session::effective_role`] reports
//! `Role::User` until the profile is confirmed.

use serde::{Deserialize, Serialize};

/// Role assigned by the backend.
///
/// Unknown wire values decode to `User` so a malformed payload can never
/// grant elevated access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::User => "user".to_string(),
            Role::Admin => "admin".to_string(),
        }
    }
}

/// Principal supplied by the identity provider after sign-in.
///
/// This is what the provider knows before the backend has been consulted:
/// a stable uid, the email, and optional display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// User profile as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "isPremium")]
    pub premium: bool,
}

impl UserProfile {
    /// Derive a provisional profile from a provider identity.
    ///
    /// Used when the backend profile fetch fails after sign-in: the name
    /// falls back to the local part of the email, the role is always
    /// `User`, and premium is never assumed.
    pub fn provisional(identity: &ProviderIdentity) -> Self {
        let name = identity
            .display_name
            .clone()
            .unwrap_or_else(|| local_part(&identity.email).to_string());

        Self {
            email: identity.email.clone(),
            name,
            photo: identity.photo_url.clone(),
            role: Role::User,
            premium: false,
        }
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Authentication state of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// No user is signed in.
    #[default]
    Unauthenticated,

    /// The provider has signed the user in; the backend profile fetch is
    /// still in flight. Guards render a waiting state here.
    Syncing { identity: ProviderIdentity },

    /// The user is signed in. `confirmed` is true only when the profile
    /// came from the backend rather than being derived from the provider
    /// identity.
    Authenticated { user: UserProfile, confirmed: bool },
}

impl Session {
    /// Transition: the identity provider reported a sign-in.
    ///
    /// Valid from any state (a new sign-in replaces whatever was there).
    pub fn sign_in(&mut self, identity: ProviderIdentity) {
        *self = Session::Syncing { identity };
    }

    /// Transition: the backend profile fetch succeeded.
    ///
    /// Valid from `Syncing` and from an existing `Authenticated` state
    /// (a profile refresh). A call while unauthenticated is ignored.
    pub fn sync_succeeded(&mut self, user: UserProfile) {
        match self {
            Session::Unauthenticated => {
                tracing::warn!("sync_succeeded while unauthenticated, ignoring");
            }
            _ => {
                *self = Session::Authenticated {
                    user,
                    confirmed: true,
                };
            }
        }
    }

    /// Transition: the backend profile fetch failed.
    ///
    /// From `Syncing` this keeps the user signed in with a provisional
    /// profile derived from the provider identity. From any other state
    /// it is ignored: an already-confirmed profile is not downgraded by
    /// a failed refresh.
    pub fn sync_failed(&mut self) {
        match self {
            Session::Syncing { identity } => {
                tracing::warn!(email = %identity.email, "profile sync failed, keeping provisional identity");
                *self = Session::Authenticated {
                    user: UserProfile::provisional(identity),
                    confirmed: false,
                };
            }
            _ => {
                tracing::warn!("sync_failed outside of Syncing, ignoring");
            }
        }
    }

    /// Transition: the user signed out. Valid from any state.
    pub fn sign_out(&mut self) {
        *self = Session::Unauthenticated;
    }

    /// True once the user is signed in, confirmed or not.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// True while the backend profile fetch is in flight.
    pub fn is_syncing(&self) -> bool {
        matches!(self, Session::Syncing { .. })
    }

    /// True only for a backend-confirmed session.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            Session::Authenticated {
                confirmed: true,
                ..
            }
        )
    }

    /// The signed-in user's profile, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// The role this session may act with.
    ///
    /// An unconfirmed profile is treated as a plain `User` regardless of
    /// the role it claims.
    pub fn effective_role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { user, confirmed } => {
                if *confirmed {
                    Some(user.role)
                } else {
                    Some(Role::User)
                }
            }
            _ => None,
        }
    }

    /// True for a confirmed admin session.
    pub fn is_admin(&self) -> bool {
        self.effective_role() == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ProviderIdentity {
        ProviderIdentity {
            uid: "uid-1".to_string(),
            email: "ada@example.com".to_string(),
            display_name: Some("Ada".to_string()),
            photo_url: None,
        }
    }

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            photo: None,
            role,
            premium: false,
        }
    }

    #[test]
    fn test_sign_in_then_confirm() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.sign_in(identity());
        assert!(session.is_syncing());
        assert!(!session.is_authenticated());

        session.sync_succeeded(profile(Role::User));
        assert!(session.is_authenticated());
        assert!(session.is_confirmed());
        assert_eq!(session.effective_role(), Some(Role::User));
    }

    #[test]
    fn test_sync_failure_keeps_provisional_identity() {
        let mut session = Session::default();
        session.sign_in(identity());
        session.sync_failed();

        assert!(session.is_authenticated());
        assert!(!session.is_confirmed());
        let user = session.user().expect("provisional user");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
        assert!(!user.premium);
    }

    #[test]
    fn test_provisional_admin_claim_is_not_trusted() {
        let mut session = Session::Authenticated {
            user: profile(Role::Admin),
            confirmed: false,
        };
        assert_eq!(session.effective_role(), Some(Role::User));
        assert!(!session.is_admin());

        // A confirmed re-sync restores the real role
        session.sync_succeeded(profile(Role::Admin));
        assert!(session.is_admin());
    }

    #[test]
    fn test_sync_failed_does_not_downgrade_confirmed_session() {
        let mut session = Session::Authenticated {
            user: profile(Role::Admin),
            confirmed: true,
        };
        session.sync_failed();
        assert!(session.is_confirmed());
        assert!(session.is_admin());
    }

    #[test]
    fn test_sync_succeeded_while_unauthenticated_is_ignored() {
        let mut session = Session::Unauthenticated;
        session.sync_succeeded(profile(Role::User));
        assert_eq!(session, Session::Unauthenticated);
    }

    #[test]
    fn test_sign_out_from_any_state() {
        let mut session = Session::Syncing {
            identity: identity(),
        };
        session.sign_out();
        assert_eq!(session, Session::Unauthenticated);

        let mut session = Session::Authenticated {
            user: profile(Role::User),
            confirmed: true,
        };
        session.sign_out();
        assert_eq!(session, Session::Unauthenticated);
    }

    #[test]
    fn test_provisional_profile_name_falls_back_to_email() {
        let id = ProviderIdentity {
            uid: "uid-2".to_string(),
            email: "grace@example.com".to_string(),
            display_name: None,
            photo_url: None,
        };
        let user = UserProfile::provisional(&id);
        assert_eq!(user.name, "grace");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_role_decoding_is_conservative() {
        let admin: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(admin, Role::Admin);

        let unknown: Role = serde_json::from_str("\"superuser\"").unwrap();
        assert_eq!(unknown, Role::User);
    }
}
