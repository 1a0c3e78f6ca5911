//! Account and session domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use juicebar_core::{Email, Role};

/// A registered account as stored in the `users` collection.
///
/// `password_hash` is an argon2 PHC string; cleartext credentials are never
/// stored or returned. The public projection is [`Profile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique address, also the account's identifier.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Argon2 hash of the password.
    pub password_hash: String,
    /// Contact phone number.
    pub phone: String,
    /// Access class, fixed at signup.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The public projection of this account (no credential material).
    #[must_use]
    pub fn profile(&self) -> Profile {
        Profile {
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            role: self.role,
        }
    }
}

/// The public view of an account, safe to hand to display layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: Email,
    pub name: String,
    pub phone: String,
    pub role: Role,
}

/// Signup input, as collected from a registration form.
///
/// Fields are raw strings; the identity store validates and parses them.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// An opaque session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Issue a fresh token.
    #[must_use]
    pub fn issue() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The token's text form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The current authenticated session.
///
/// Cleared wholesale on logout; persisted under the `token` collection so a
/// restart resumes the same principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user's public profile.
    pub user: Profile,
    /// Opaque token issued at login/signup.
    pub token: SessionToken,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_omits_credential_material() {
        let account = Account {
            email: Email::parse("user@shop.test").unwrap(),
            name: "User".to_owned(),
            password_hash: "$argon2id$...".to_owned(),
            phone: "555-0100".to_owned(),
            role: Role::User,
            created_at: Utc::now(),
        };

        let profile = account.profile();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("user@shop.test"));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(SessionToken::issue(), SessionToken::issue());
    }
}
