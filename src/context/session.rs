use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use send_wrapper::SendWrapper;

use crate::components::{FullPageErrorFallback, FullPageLoading};
use crate::error::{AuthError, MissingSessionProvider};
use crate::models::{AsyncState, AuthForm, User, UserEnvelope};
use crate::services::{request_json, ApiClient, AuthClient, Collaborators, RequestConfig};

/// Resolve the user behind the stored credential.
///
/// Without a token this settles to `None` immediately and makes no request.
#[allow(clippy::future_not_send)]
pub async fn bootstrap_user(
    auth: &dyn AuthClient,
    api: &dyn ApiClient,
) -> Result<Option<User>, AuthError> {
    let Some(token) = auth.get_token() else {
        tracing::debug!("No stored token, starting logged out");
        return Ok(None);
    };

    let envelope: UserEnvelope = request_json(api, "me", RequestConfig::with_token(token)).await?;
    Ok(Some(envelope.user))
}

/// What the provider renders in place of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionGate {
    /// Bootstrap not started or still in flight
    Loading,
    /// Bootstrap failed; nothing below the provider may render
    Failed(AuthError),
    /// Session resolved (possibly to "logged out")
    Ready,
}

impl SessionGate {
    pub fn from_state<T>(state: &AsyncState<T>) -> Self {
        match state {
            AsyncState::Idle | AsyncState::Loading => Self::Loading,
            AsyncState::Failed(err) => Self::Failed(err.clone()),
            AsyncState::Ready(_) => Self::Ready,
        }
    }
}

/// Reactive session shared with every view under [`SessionProvider`].
///
/// The session is only mutated through [`SessionStore::bootstrap`] and the
/// login/register/logout operations.
#[derive(Clone, Copy)]
pub struct SessionStore {
    /// Current user together with the bootstrap status
    state: RwSignal<AsyncState<Option<User>>>,
    /// Status of the most recent login/register/logout (last write wins)
    operation: RwSignal<AsyncState<()>>,
    collaborators: StoredValue<SendWrapper<Collaborators>>,
}

#[allow(clippy::future_not_send)]
impl SessionStore {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            state: RwSignal::new(AsyncState::Idle),
            operation: RwSignal::new(AsyncState::Idle),
            collaborators: StoredValue::new(SendWrapper::new(collaborators)),
        }
    }

    fn collaborators(&self) -> Collaborators {
        self.collaborators
            .with_value(|collaborators| Collaborators::clone(collaborators))
    }

    /// Current user, `None` when logged out or not yet resolved
    pub fn user(&self) -> Option<User> {
        self.state.with(|state| state.data().cloned().flatten())
    }

    pub fn user_untracked(&self) -> Option<User> {
        self.state
            .with_untracked(|state| state.data().cloned().flatten())
    }

    pub fn state_untracked(&self) -> AsyncState<Option<User>> {
        self.state.get_untracked()
    }

    pub fn gate(&self) -> SessionGate {
        self.state.with(SessionGate::from_state)
    }

    pub fn gate_untracked(&self) -> SessionGate {
        self.state.with_untracked(SessionGate::from_state)
    }

    pub fn operation(&self) -> AsyncState<()> {
        self.operation.get()
    }

    pub fn operation_untracked(&self) -> AsyncState<()> {
        self.operation.get_untracked()
    }

    /// True while a login/register/logout is in flight
    pub fn is_busy(&self) -> bool {
        self.operation.with(AsyncState::is_loading)
    }

    /// Restore the session from the stored credential.
    ///
    /// Only the first call on a store does anything.
    pub async fn bootstrap(&self) {
        if !self.state.with_untracked(AsyncState::is_idle) {
            tracing::debug!("Session bootstrap already started, skipping");
            return;
        }
        self.state.set(AsyncState::Loading);

        let collaborators = self.collaborators();
        let result = bootstrap_user(collaborators.auth.as_ref(), collaborators.api.as_ref()).await;

        match &result {
            Ok(Some(user)) => tracing::info!("Session restored for user {}", user.id),
            Ok(None) => tracing::info!("No session to restore"),
            Err(e) => tracing::error!("Session bootstrap failed: {e}"),
        }
        self.state.set(result.into());
    }

    /// Log in and replace the session with the returned user.
    /// Failures are returned to the caller untouched.
    pub async fn login(&self, form: AuthForm) -> Result<(), AuthError> {
        let auth = self.collaborators().auth;
        let user = self.track(auth.login(&form)).await?;
        tracing::info!("Logged in as user {}", user.id);
        self.set_user(Some(user));
        Ok(())
    }

    /// Register and replace the session with the server's answer: the new
    /// user, or no session when the account was created without a login.
    pub async fn register(&self, form: AuthForm) -> Result<(), AuthError> {
        let auth = self.collaborators().auth;
        let user = self.track(auth.register(&form)).await?;
        match &user {
            Some(user) => tracing::info!("Registered and logged in as user {}", user.id),
            None => tracing::info!("Registered; no session returned"),
        }
        self.set_user(user);
        Ok(())
    }

    /// Log out, clear the session and drop all cached server data.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let Collaborators { auth, cache, .. } = self.collaborators();
        self.track(auth.logout()).await?;
        self.set_user(None);
        cache.invalidate_all();
        tracing::info!("Logged out");
        Ok(())
    }

    fn set_user(&self, user: Option<User>) {
        self.state.set(AsyncState::Ready(user));
    }

    async fn track<T>(
        &self,
        operation: impl Future<Output = Result<T, AuthError>>,
    ) -> Result<T, AuthError> {
        self.operation.set(AsyncState::Loading);
        let result = operation.await;
        self.operation.set(match &result {
            Ok(_) => AsyncState::Ready(()),
            Err(e) => {
                tracing::warn!("Session operation failed: {e}");
                AsyncState::Failed(e.clone())
            }
        });
        result
    }
}

/// Session store of the enclosing [`SessionProvider`].
///
/// # Panics
/// Panics when called outside a `SessionProvider` subtree.
pub fn use_session() -> SessionStore {
    use_context::<SessionStore>()
        .expect("use_session must be called from a component rendered inside <SessionProvider>")
}

/// Non-panicking variant of [`use_session`].
pub fn try_use_session() -> Result<SessionStore, MissingSessionProvider> {
    use_context::<SessionStore>().ok_or(MissingSessionProvider)
}

/// Owns the session, bootstraps it once on mount and withholds its children
/// until the bootstrap has settled.
#[component]
pub fn SessionProvider(collaborators: Collaborators, children: ChildrenFn) -> impl IntoView {
    let session = SessionStore::new(collaborators);
    provide_context(session);

    spawn_local(async move {
        session.bootstrap().await;
    });

    let gate = Memo::new(move |_| session.gate());

    view! {
        {move || match gate.get() {
            SessionGate::Loading => view! { <FullPageLoading /> }.into_any(),
            SessionGate::Failed(error) => {
                view! { <FullPageErrorFallback message=error.to_string() /> }.into_any()
            }
            SessionGate::Ready => children().into_any(),
        }}
    }
}
