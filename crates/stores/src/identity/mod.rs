//! Identity store: the account registry and current session.
//!
//! Owns signup, login, and logout, and is consulted by the other stores to
//! scope data per user. Passwords are hashed with argon2 at registration
//! and verified at login; cleartext is never stored and the public
//! [`Profile`] never carries credential material.
//!
//! The session survives restarts: it is persisted under the `token`
//! collection and reloaded when the store opens, mirroring how the
//! accounts registry itself is persisted under `users`.

mod error;

pub use error::AuthError;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use juicebar_core::{Email, Role};

use crate::config::StoreConfig;
use crate::last_error::LastError;
use crate::models::{Account, Profile, Session, SessionToken, SignupRequest};
use crate::storage::{self, StorageBackend, collections};

/// Read-only view of the current authenticated principal.
///
/// Implemented by [`IdentityStore`]; the order store depends on this seam
/// rather than on the concrete store so tests (or another identity source)
/// can stand in for it.
pub trait PrincipalProvider: Send + Sync {
    /// The currently authenticated user's public profile, if any.
    fn current_principal(&self) -> Option<Profile>;
}

/// The account registry and current session.
pub struct IdentityStore {
    backend: Arc<dyn StorageBackend>,
    admin_email: String,
    /// Registry keyed by lowercased email; stored accounts keep original casing.
    accounts: Mutex<BTreeMap<String, Account>>,
    /// Lock-free reads for the other stores; written only after a
    /// successful persist inside a mutation.
    session: RwLock<Option<Session>>,
    last_error: LastError,
}

impl IdentityStore {
    /// Open the identity store, loading the persisted registry and any
    /// surviving session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if a persisted document cannot be read
    /// or decoded.
    pub async fn open(
        backend: Arc<dyn StorageBackend>,
        config: &StoreConfig,
    ) -> Result<Self, AuthError> {
        let accounts: BTreeMap<String, Account> =
            storage::load(backend.as_ref(), collections::USERS)
                .await?
                .unwrap_or_default();
        let session: Option<Session> = storage::load(backend.as_ref(), collections::TOKEN).await?;

        debug!(
            accounts = accounts.len(),
            resumed_session = session.is_some(),
            "identity store loaded"
        );

        Ok(Self {
            backend,
            admin_email: config.admin_email.normalized(),
            accounts: Mutex::new(accounts),
            session: RwLock::new(session),
            last_error: LastError::new(),
        })
    }

    /// Authenticate with email and password.
    ///
    /// On success a fresh session replaces any existing one, and the
    /// account's public profile is returned. Failures leave the session
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` on blank input,
    /// `AuthError::AccountNotFound` if the email is unknown,
    /// `AuthError::InvalidCredentials` if the password is wrong, or
    /// `AuthError::Storage` if persisting the session fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        self.last_error.clear();
        self.finish(self.authenticate(email, password).await)
    }

    /// Register a new account and establish a session exactly as
    /// [`login`](Self::login) does.
    ///
    /// The role is derived at registration: the configured admin address
    /// gets [`Role::Admin`], everything else [`Role::User`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for any blank field,
    /// `AuthError::PasswordMismatch` if the confirmation differs,
    /// `AuthError::InvalidEmail` on a malformed address,
    /// `AuthError::DuplicateAccount` if the email is taken, or
    /// `AuthError::Storage` if persisting fails.
    pub async fn signup(&self, request: SignupRequest) -> Result<Profile, AuthError> {
        self.last_error.clear();
        self.finish(self.register(request).await)
    }

    /// Clear the current session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if deleting the persisted session
    /// fails; the in-memory session is cleared regardless.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.last_error.clear();

        if let Ok(mut session) = self.session.write() {
            if session.take().is_some() {
                info!("session cleared");
            }
        }

        let result = self
            .backend
            .remove(collections::TOKEN)
            .await
            .map_err(AuthError::Storage);
        self.finish(result)
    }

    /// The current session, if authenticated.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    /// The current user's public profile, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<Profile> {
        self.current_session().map(|s| s.user)
    }

    /// Message of the most recent failed operation, for display layers.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.get()
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let email = Email::parse(email.trim())?;

        let accounts = self.accounts.lock().await;
        let account = accounts
            .get(&email.normalized())
            .ok_or(AuthError::AccountNotFound)?;

        verify_password(password, &account.password_hash)?;

        let profile = account.profile();
        drop(accounts);

        let session = Session {
            user: profile.clone(),
            token: SessionToken::issue(),
        };
        storage::persist(self.backend.as_ref(), collections::TOKEN, &session).await?;
        self.publish_session(session);

        info!(email = %profile.email, "login succeeded");
        Ok(profile)
    }

    async fn register(&self, request: SignupRequest) -> Result<Profile, AuthError> {
        if request.name.trim().is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if request.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if request.confirm_password.is_empty() {
            return Err(AuthError::MissingField("password confirmation"));
        }
        if request.phone.trim().is_empty() {
            return Err(AuthError::MissingField("phone"));
        }
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let email = Email::parse(request.email.trim())?;

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&email.normalized()) {
            return Err(AuthError::DuplicateAccount);
        }

        let role = if email.normalized() == self.admin_email {
            Role::Admin
        } else {
            Role::User
        };

        let account = Account {
            email: email.clone(),
            name: request.name.trim().to_owned(),
            password_hash: hash_password(&request.password)?,
            phone: request.phone.trim().to_owned(),
            role,
            created_at: Utc::now(),
        };
        let profile = account.profile();
        let session = Session {
            user: profile.clone(),
            token: SessionToken::issue(),
        };

        // Both documents must be durable before either commit to memory.
        let mut next = accounts.clone();
        next.insert(email.normalized(), account);
        storage::persist(self.backend.as_ref(), collections::USERS, &next).await?;
        storage::persist(self.backend.as_ref(), collections::TOKEN, &session).await?;
        *accounts = next;
        drop(accounts);
        self.publish_session(session);

        info!(email = %profile.email, role = %profile.role, "account registered");
        Ok(profile)
    }

    fn publish_session(&self, session: Session) {
        if let Ok(mut slot) = self.session.write() {
            *slot = Some(session);
        }
    }

    fn finish<T>(&self, result: Result<T, AuthError>) -> Result<T, AuthError> {
        if let Err(err) = &result {
            self.last_error.record(err);
        }
        result
    }
}

impl PrincipalProvider for IdentityStore {
    fn current_principal(&self) -> Option<Profile> {
        self.current_user()
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
