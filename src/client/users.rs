//! User endpoints: registration, profile sync, admin, subscription

use serde::Deserialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::client::payload::ListPayload;
use crate::core::error::HubError;
use crate::core::notify::Notifier;
use crate::core::session::{ProviderIdentity, Session, UserProfile};

/// Response from checkout-session creation; the caller redirects the
/// browser to `url`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CheckoutSession {
    pub url: Option<String>,
}

/// User endpoint group, obtained from [`ApiClient::users`].
pub struct UsersApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl UsersApi<'_> {
    /// Create the backend user record right after provider registration.
    pub async fn register(&self, identity: &ProviderIdentity) -> Result<(), HubError> {
        self.client
            .post_ignored(
                "/users",
                &json!({
                    "name": identity
                        .display_name
                        .clone()
                        .unwrap_or_else(|| identity.email.clone()),
                    "email": identity.email,
                    "image": identity.photo_url,
                }),
            )
            .await
    }

    /// Upsert the provider identity into the backend user record.
    pub async fn sync(&self, identity: &ProviderIdentity) -> Result<(), HubError> {
        self.client
            .post_ignored(
                &format!("/users/{}", identity.email),
                &json!({
                    "name": identity
                        .display_name
                        .clone()
                        .unwrap_or_else(|| identity.email.clone()),
                    "photo": identity.photo_url,
                    "uid": identity.uid,
                }),
            )
            .await
    }

    /// Fetch the caller's backend profile.
    pub async fn me(&self) -> Result<UserProfile, HubError> {
        self.client.get_json("/user/me").await
    }

    /// Update the caller's profile.
    pub async fn update_profile(
        &self,
        name: &str,
        photo: Option<&str>,
    ) -> Result<(), HubError> {
        self.client
            .patch_ignored("/user/me", &json!({ "name": name, "photo": photo }))
            .await
    }

    /// Public contributor listing.
    pub async fn contributors(&self) -> Result<Vec<UserProfile>, HubError> {
        let payload: ListPayload<UserProfile> = self.client.get_json("/users").await?;
        Ok(payload.into_items())
    }

    // === Admin ===

    /// Full user listing (admin).
    pub async fn list_all(&self) -> Result<Vec<UserProfile>, HubError> {
        let payload: ListPayload<UserProfile> = self.client.get_json("/admin/users").await?;
        Ok(payload.into_items())
    }

    /// Grant the admin role to a user (admin).
    pub async fn promote_to_admin(&self, user_id: &str) -> Result<(), HubError> {
        self.client
            .patch_ignored(&format!("/users/admin/{user_id}"), &json!({}))
            .await
    }

    /// Delete a user record (admin).
    pub async fn delete(&self, user_id: &str) -> Result<(), HubError> {
        self.client
            .delete_ignored(&format!("/admin/users/{user_id}"))
            .await
    }

    // === Subscription ===

    /// Create a checkout session for the premium plan; the returned URL
    /// is where the external payment provider takes over.
    pub async fn create_checkout_session(
        &self,
        plan_id: &str,
    ) -> Result<CheckoutSession, HubError> {
        self.client
            .post_json("/create-checkout-session", &json!({ "planId": plan_id }))
            .await
    }

    /// Run the sign-in sync flow and return the resulting session.
    ///
    /// The provider has already authenticated the user; this fetches the
    /// backend profile to confirm the identity. On failure the session
    /// stays signed in provisionally and the failure is surfaced through
    /// the notifier — the caller may retry the sync later.
    pub async fn establish_session(
        &self,
        identity: ProviderIdentity,
        notifier: &dyn Notifier,
    ) -> Session {
        let mut session = Session::Unauthenticated;
        session.sign_in(identity);

        match self.me().await {
            Ok(profile) => {
                tracing::info!(email = %profile.email, "profile sync confirmed");
                session.sync_succeeded(profile);
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile sync failed");
                notifier.error("Could not sync your profile; some features may be limited.");
                session.sync_failed();
            }
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_session_tolerates_missing_url() {
        let session: CheckoutSession = serde_json::from_str("{}").unwrap();
        assert_eq!(session.url, None);

        let session: CheckoutSession =
            serde_json::from_str(r#"{"url": "https://pay.example.com/cs_123"}"#).unwrap();
        assert_eq!(session.url.as_deref(), Some("https://pay.example.com/cs_123"));
    }

    #[test]
    fn test_user_profile_decodes_is_premium_alias() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"email": "ada@example.com", "name": "Ada", "role": "admin", "isPremium": true}"#,
        )
        .unwrap();
        assert!(profile.premium);
        assert_eq!(profile.role, crate::core::session::Role::Admin);
    }
}
