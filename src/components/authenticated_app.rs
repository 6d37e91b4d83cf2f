use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_session, SessionStore};

/// Shell shown to a logged-in user.
#[component]
pub fn AuthenticatedApp() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="authenticated-app">
            <header class="app-header">
                <span class="app-title">"Portal"</span>
                <span class="greeting">
                    {move || session.user().map(|user| greeting(&user.name)).unwrap_or_default()}
                </span>
                <button
                    class="logout-button"
                    prop:disabled=move || session.is_busy()
                    on:click=move |_| logout(session)
                >
                    "Log out"
                </button>
            </header>
            {move || {
                session
                    .operation()
                    .error()
                    .map(|e| view! { <div class="notification-bar">{format!("Logout failed: {e}")}</div> })
            }}
            <main class="app-main">
                <p>"You are signed in."</p>
            </main>
        </div>
    }
}

/// Failures land in the session's operation status, which the header shows.
fn logout(session: SessionStore) {
    spawn_local(async move {
        if let Err(e) = session.logout().await {
            tracing::warn!("Logout failed: {e}");
        }
    });
}

fn greeting(name: &str) -> String {
    if name.trim().is_empty() {
        "Hi!".to_string()
    } else {
        format!("Hi, {name}")
    }
}
