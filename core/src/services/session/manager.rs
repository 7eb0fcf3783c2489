//! Session state machine

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::domain::entities::User;
use crate::domain::value_objects::{Identity, Route};
use crate::errors::{DomainError, DomainResult, ErrorDisposition};
use crate::repositories::CredentialStore;
use crate::services::policy::destination_after_login;
use crate::services::token::TokenVerifier;

use super::state::{LoginOutcome, Session, SessionState};
use super::traits::ProfileFetcher;

/// Owns the signed-in user and the stored credential
///
/// Every operation that ends in a profile fetch takes a new generation
/// number. State and store writes happen under `commit` and only while the
/// operation's generation is still the latest; `logout` bumps the
/// generation under the same lock, so a fetch that resolves after a logout
/// can never resurrect the session.
pub struct SessionManager {
    verifier: Arc<TokenVerifier>,
    fetcher: Arc<dyn ProfileFetcher>,
    store: Arc<dyn CredentialStore>,
    generation: AtomicU64,
    commit: Mutex<()>,
    state: watch::Sender<Session>,
}

impl SessionManager {
    /// Creates a session manager in the `Initializing` state
    ///
    /// # Arguments
    ///
    /// * `verifier` - Decodes stored credentials
    /// * `fetcher` - Loads the profile behind a credential
    /// * `store` - Durable credential storage
    pub fn new(
        verifier: Arc<TokenVerifier>,
        fetcher: Arc<dyn ProfileFetcher>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let (state, _) = watch::channel(Session::initializing());
        Self {
            verifier,
            fetcher,
            store,
            generation: AtomicU64::new(0),
            commit: Mutex::new(()),
            state,
        }
    }

    /// Latest session snapshot
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every future snapshot
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The stored credential, for attaching to outgoing requests
    pub async fn bearer_token(&self) -> Option<String> {
        if !self.current().is_authenticated() {
            return None;
        }
        self.store.load_token().await.ok().flatten()
    }

    /// Restore the session from the stored credential
    ///
    /// A missing or unusable credential is evicted. When the profile fetch
    /// fails upstream, the cached profile snapshot stands in for it.
    pub async fn initialize(&self) -> Session {
        let generation = self.begin();

        let token = match self.store.load_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read stored credential");
                None
            }
        };

        let identity = match self.verifier.verify(token.as_deref()) {
            Ok(identity) => identity,
            Err(reason) => {
                debug!(reason = %reason, "No usable stored credential");
                self.evict_if_current(generation).await;
                return self.current();
            }
        };
        let Some(token) = token else {
            return self.current();
        };

        if !self
            .publish_if_current(generation, Session::authenticating(identity.clone()))
            .await
        {
            return self.current();
        }

        match self.fetcher.fetch_profile(&token).await {
            Ok(user) => {
                self.commit_user(generation, identity, user).await;
            }
            Err(e) if e.is_auth_failure() => {
                info!(error = %e, "Stored credential rejected by backend");
                self.evict_if_current(generation).await;
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch failed, trying cached profile");
                match self.store.load_profile().await.ok().flatten() {
                    Some(cached) if cached.id == identity.id => {
                        self.publish_if_current(generation, Session::authenticated(identity, cached))
                            .await;
                    }
                    _ => {
                        self.evict_if_current(generation).await;
                    }
                }
            }
        }

        self.current()
    }

    /// Sign in with a freshly issued credential
    ///
    /// # Arguments
    ///
    /// * `token` - Credential returned by the authentication endpoint
    /// * `redirect_hint` - Page the visitor was bounced from, if any
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome::Authenticated)` - signed in, with where to go next
    /// * `Ok(LoginOutcome::Superseded)` - a later login or logout won
    /// * `Err(DomainError::Token)` - the credential is unusable; signed out
    /// * `Err(_)` - the profile could not be fetched; signed out
    pub async fn login(&self, token: &str, redirect_hint: Option<&str>) -> DomainResult<LoginOutcome> {
        let generation = self.begin();

        {
            let _guard = self.commit.lock().await;
            if !self.is_current(generation) {
                return Ok(LoginOutcome::Superseded);
            }
            self.store.save_token(token).await?;
        }

        let identity = match self.verifier.verify(Some(token)) {
            Ok(identity) => identity,
            Err(reason) => {
                info!(reason = %reason, "Rejected credential at login");
                if !self.evict_if_current(generation).await {
                    return Ok(LoginOutcome::Superseded);
                }
                return Err(reason.into());
            }
        };

        if !self
            .publish_if_current(generation, Session::authenticating(identity.clone()))
            .await
        {
            return Ok(LoginOutcome::Superseded);
        }

        match self.fetcher.fetch_profile(token).await {
            Ok(user) => {
                let role = user.role;
                if self.commit_user(generation, identity, user).await {
                    Ok(LoginOutcome::Authenticated {
                        destination: destination_after_login(role, redirect_hint),
                    })
                } else {
                    Ok(LoginOutcome::Superseded)
                }
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch failed during login");
                if self.evict_if_current(generation).await {
                    Err(e)
                } else {
                    Ok(LoginOutcome::Superseded)
                }
            }
        }
    }

    /// Sign out
    ///
    /// Evicts the credential and the cached profile together, drops the
    /// user and invalidates any fetch still in flight.
    ///
    /// # Returns
    ///
    /// The login route to navigate to
    pub async fn logout(&self) -> Route {
        let _guard = self.commit.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Could not clear stored credential");
        }
        self.state.send_replace(Session::unauthenticated());
        info!("Signed out");
        Route::login()
    }

    /// Reload the profile with the stored credential
    ///
    /// No-op without a stored credential. An authentication failure signs
    /// out unless a newer operation has started since; an upstream failure
    /// leaves the session as it was.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - the refreshed profile
    /// * `Ok(None)` - nothing stored, or a newer operation took over
    pub async fn refetch_user(&self) -> DomainResult<Option<User>> {
        let Some(token) = self.store.load_token().await? else {
            return Ok(None);
        };
        let generation = self.begin();

        let identity = match self.verifier.verify(Some(&token)) {
            Ok(identity) => identity,
            Err(reason) => {
                info!(reason = %reason, "Stored credential no longer usable");
                if !self.evict_if_current(generation).await {
                    return Ok(None);
                }
                return Err(reason.into());
            }
        };

        match self.fetcher.fetch_profile(&token).await {
            Ok(user) => {
                if self.commit_user(generation, identity, user.clone()).await {
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            Err(e) if e.is_auth_failure() => {
                if !self.evict_if_current(generation).await {
                    debug!(generation, "Ignoring rejection for a superseded refetch");
                    return Ok(None);
                }
                info!(error = %e, "Credential rejected on refetch");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Profile refetch failed, keeping session");
                Err(e)
            }
        }
    }

    /// Apply the propagation policy to a failed request
    pub async fn handle_request_error(&self, error: &DomainError) -> ErrorDisposition {
        let disposition = error.disposition();
        match disposition {
            ErrorDisposition::LogoutAndRedirect => {
                info!(error = %error, "Request failed authentication");
                self.logout().await;
            }
            ErrorDisposition::AccessDenied => {
                debug!(error = %error, "Request forbidden");
            }
            ErrorDisposition::Notify => {
                warn!(error = %error, "Request failed");
            }
        }
        disposition
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn publish_if_current(&self, generation: u64, session: Session) -> bool {
        let _guard = self.commit.lock().await;
        if !self.is_current(generation) {
            return false;
        }
        self.state.send_replace(session);
        true
    }

    async fn commit_user(&self, generation: u64, identity: Identity, user: User) -> bool {
        let _guard = self.commit.lock().await;
        if !self.is_current(generation) {
            debug!(generation, "Discarding stale profile");
            return false;
        }
        if let Err(e) = self.store.save_profile(&user).await {
            warn!(error = %e, "Could not cache profile snapshot");
        }
        info!(user_id = %user.id, role = %user.role, "Signed in");
        self.state.send_replace(Session::authenticated(identity, user));
        true
    }

    async fn evict_if_current(&self, generation: u64) -> bool {
        let _guard = self.commit.lock().await;
        if !self.is_current(generation) {
            return false;
        }
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Could not clear stored credential");
        }
        let signed_out = self.state.borrow().state == SessionState::Unauthenticated;
        if !signed_out {
            self.state.send_replace(Session::unauthenticated());
        }
        true
    }
}
