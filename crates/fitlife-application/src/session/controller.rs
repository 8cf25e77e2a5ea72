use fitlife_core::account::{AccountApi, Registration, UserRecord};
use fitlife_core::avatar::AvatarStore;
use fitlife_core::credential::{CredentialField, CredentialStore, CredentialValue};
use fitlife_core::session::{AuthFailure, AuthPhase, Session, SessionState};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use super::messages;
use crate::scope::TaskScope;

/// Owns the session lifecycle.
///
/// `SessionController` is the only writer of the session fields in the
/// credential store. It is responsible for:
/// - Validating credentials before any network call
/// - Persisting the session returned by login and registration
/// - Publishing the session state and the `is_authenticated` signal
/// - Clearing the session (and the cached avatar) on logout
/// - Running background refreshes in its own [`TaskScope`]
///
/// Other components hold `watch::Receiver`s obtained from
/// [`subscribe`](Self::subscribe) and [`authenticated`](Self::authenticated).
pub struct SessionController {
    /// Durable session fields and per-user stats
    credentials: Arc<dyn CredentialStore>,
    /// Remote account service
    api: Arc<dyn AccountApi>,
    /// Cached profile picture, removed on logout
    avatars: Option<Arc<dyn AvatarStore>>,
    state: watch::Sender<SessionState>,
    authenticated: watch::Sender<bool>,
    /// Serializes login, register, logout and refresh.
    op_lock: Mutex<()>,
    /// Background work started by the controller; cancelled with it.
    scope: TaskScope,
}

impl SessionController {
    pub fn new(credentials: Arc<dyn CredentialStore>, api: Arc<dyn AccountApi>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let (authenticated, _) = watch::channel(false);
        Self {
            credentials,
            api,
            avatars: None,
            state,
            authenticated,
            op_lock: Mutex::new(()),
            scope: TaskScope::new(),
        }
    }

    pub fn with_avatar_store(mut self, avatars: Arc<dyn AvatarStore>) -> Self {
        self.avatars = Some(avatars);
        self
    }

    /// Loads the persisted session and publishes the matching phase.
    ///
    /// An unreadable store is treated as an anonymous session.
    pub async fn restore(&self) -> SessionState {
        let _guard = self.op_lock.lock().await;

        let session = self.credentials.load_session().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read stored session, starting anonymous");
            Session::default()
        });
        let phase = if session.is_logged_in {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        };

        tracing::debug!(
            logged_in = session.is_logged_in,
            has_token = session.bearer_token().is_some(),
            "Restored session"
        );
        self.publish(SessionState {
            phase,
            session,
            profile_error: None,
        });
        self.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Signal that follows the persisted login flag.
    pub fn authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Logs in and persists the returned session.
    ///
    /// A missing token in the response is stored as an empty string and the
    /// session still counts as logged in.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthFailure> {
        let _guard = self.op_lock.lock().await;

        if is_blank(email) || is_blank(password) {
            return Err(self.fail(messages::incomplete_fields()));
        }
        let email = email.trim();

        self.set_phase(AuthPhase::Authenticating);
        tracing::info!(email, "Logging in");

        let response = self
            .api
            .login(email, password)
            .await
            .map_err(|e| self.fail(messages::login_failure(&e)))?;

        if response.access_token.is_none() {
            tracing::warn!(email, "Login response carried no token");
        }

        let user_name = response.display_name();
        let session = Session {
            auth_token: Some(response.access_token.unwrap_or_default()),
            user_email: Some(non_blank(response.email).unwrap_or_else(|| email.to_string())),
            user_name,
            is_logged_in: true,
        };
        self.establish(session).await
    }

    /// Registers a new account and persists the returned session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Session, AuthFailure> {
        let _guard = self.op_lock.lock().await;

        if is_blank(email) || is_blank(password) {
            return Err(self.fail(messages::incomplete_fields()));
        }

        let registration = Registration {
            email: email.trim().to_string(),
            password: password.to_string(),
            name: non_blank(name.map(str::to_string)).map(|n| n.trim().to_string()),
        };

        self.set_phase(AuthPhase::Authenticating);
        tracing::info!(email = %registration.email, "Registering account");

        let account = self
            .api
            .register(&registration)
            .await
            .map_err(|e| self.fail(messages::register_failure(&e)))?;

        if account.token.is_none() {
            tracing::warn!(email = %registration.email, "Registration response carried no token");
        }

        let user = account.user.unwrap_or_default();
        let session = Session {
            auth_token: Some(account.token.unwrap_or_default()),
            user_email: Some(non_blank(user.email).unwrap_or(registration.email)),
            user_name: non_blank(user.name).or(registration.name),
            is_logged_in: true,
        };
        self.establish(session).await
    }

    /// Clears every session field and the cached avatar. Never fails.
    pub async fn logout(&self) {
        let _guard = self.op_lock.lock().await;

        if let Err(e) = self.credentials.clear_all().await {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        if let Some(avatars) = &self.avatars {
            if let Err(e) = avatars.clear().await {
                tracing::warn!(error = %e, "Failed to remove cached avatar");
            }
        }

        self.publish(SessionState::default());
        tracing::info!("Logged out");
    }

    /// Fetches the current user's profile and stores the refreshed name and
    /// email.
    ///
    /// Failures are published as `profile_error`; the auth phase is left
    /// alone.
    pub async fn refresh_profile(&self) -> Result<UserRecord, AuthFailure> {
        let _guard = self.op_lock.lock().await;

        let token = match self.credentials.token().await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return Err(self.fail_profile(messages::no_session())),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token");
                return Err(self.fail_profile(messages::no_session()));
            }
        };

        let user = self
            .api
            .fetch_profile(&token)
            .await
            .map_err(|e| self.fail_profile(messages::profile_failure(&e)))?;

        let name = user.display_name();
        let email = non_blank(user.email.clone());

        if let Err(e) = self.save_profile(name.as_deref(), email.as_deref()).await {
            tracing::error!(error = %e, "Failed to persist refreshed profile");
            return Err(self.fail_profile(messages::save_failed()));
        }

        self.state.send_modify(|state| {
            if let Some(name) = name {
                state.session.user_name = Some(name);
            }
            if let Some(email) = email {
                state.session.user_email = Some(email);
            }
            state.profile_error = None;
        });
        tracing::debug!(user_id = %user.id, "Profile refreshed");

        Ok(user)
    }

    /// Starts [`refresh_profile`](Self::refresh_profile) without waiting.
    ///
    /// The outcome is published on the state channel. The task is cancelled
    /// by [`shutdown`](Self::shutdown) or when the controller is dropped.
    pub fn refresh_profile_in_background(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        self.scope.spawn(async move {
            // Failures are already published as `profile_error`.
            let _ = controller.refresh_profile().await;
        });
    }

    /// Waits for every background task to finish.
    pub async fn settle(&self) {
        self.scope.drain().await;
    }

    /// Cancels and joins every background task.
    pub async fn shutdown(&self) {
        self.scope.shutdown().await;
    }

    async fn establish(&self, session: Session) -> Result<Session, AuthFailure> {
        let previous = self.credentials.load_session().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read stored session before writing");
            Session::default()
        });

        if let Err(e) = self.credentials.save_session(&session).await {
            tracing::error!(error = %e, "Failed to persist session");
            self.roll_back(previous).await;
            return Err(self.fail(messages::save_failed()));
        }

        self.publish(SessionState {
            phase: AuthPhase::Authenticated,
            session: session.clone(),
            profile_error: None,
        });
        tracing::info!(
            email = session.email().unwrap_or_default(),
            has_token = session.bearer_token().is_some(),
            "Session established"
        );
        Ok(session)
    }

    /// Puts back the session that was stored before a failed write.
    ///
    /// When that is not possible either, the session fields are cleared so no
    /// token from the failed write is left behind.
    async fn roll_back(&self, previous: Session) {
        let restored = match self.credentials.clear_all().await {
            Ok(()) if previous.is_empty() => true,
            Ok(()) => match self.credentials.save_session(&previous).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not restore previous session");
                    if let Err(e) = self.credentials.clear_all().await {
                        tracing::warn!(error = %e, "Failed to clear stored session");
                    }
                    false
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Could not roll back partial session write");
                false
            }
        };

        if !restored {
            self.publish(SessionState::default());
        }
    }

    async fn save_profile(&self, name: Option<&str>, email: Option<&str>) -> fitlife_core::Result<()> {
        if let Some(name) = name {
            self.credentials
                .save(CredentialField::Name, CredentialValue::text(name))
                .await?;
        }
        if let Some(email) = email {
            self.credentials
                .save(CredentialField::Email, CredentialValue::text(email))
                .await?;
        }
        Ok(())
    }

    fn set_phase(&self, phase: AuthPhase) {
        self.state.send_modify(|state| state.phase = phase);
    }

    fn publish(&self, state: SessionState) {
        let logged_in = state.session.is_logged_in;
        self.state.send_replace(state);
        self.authenticated.send_if_modified(|current| {
            let changed = *current != logged_in;
            *current = logged_in;
            changed
        });
    }

    fn fail(&self, failure: AuthFailure) -> AuthFailure {
        tracing::warn!(kind = ?failure.kind, message = %failure.message, "Authentication failed");
        let message = failure.message.clone();
        self.set_phase(AuthPhase::AuthenticationFailed { message });
        failure
    }

    fn fail_profile(&self, failure: AuthFailure) -> AuthFailure {
        tracing::warn!(kind = ?failure.kind, message = %failure.message, "Profile refresh failed");
        let message = failure.message.clone();
        self.state
            .send_modify(|state| state.profile_error = Some(message));
        failure
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
