use leptos::error::Errors;
use leptos::prelude::*;

use crate::components::{AuthenticatedApp, FullPageErrorFallback, UnauthenticatedApp};
use crate::context::use_session;
use crate::models::User;

/// Which subtree the root renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Authenticated,
    Unauthenticated,
}

impl AppView {
    pub const fn for_user(user: Option<&User>) -> Self {
        if user.is_some() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Root component: picks the authenticated or unauthenticated app from the
/// current session. Must be mounted inside `SessionProvider`.
#[component]
pub fn App() -> impl IntoView {
    let session = use_session();
    let view_kind = Memo::new(move |_| AppView::for_user(session.user().as_ref()));

    view! {
        <div class="app">
            <ErrorBoundary fallback=|errors| {
                view! {
                    {move || view! { <FullPageErrorFallback message=errors_message(errors.get()) /> }}
                }
            }>
                {move || match view_kind.get() {
                    AppView::Authenticated => view! { <AuthenticatedApp /> }.into_any(),
                    AppView::Unauthenticated => view! { <UnauthenticatedApp /> }.into_any(),
                }}
            </ErrorBoundary>
        </div>
    }
}

fn errors_message(errors: Errors) -> String {
    let messages: Vec<String> = errors
        .into_iter()
        .map(|(_, error)| error.to_string())
        .collect();
    if messages.is_empty() {
        "Something went wrong".to_string()
    } else {
        messages.join("; ")
    }
}
