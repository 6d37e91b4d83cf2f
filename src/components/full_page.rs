use leptos::prelude::*;

/// Spinner covering the whole page while the session is resolving.
#[component]
pub fn FullPageLoading() -> impl IntoView {
    view! {
        <div class="full-page">
            <div class="spinner" role="status" aria-label="Loading"></div>
        </div>
    }
}

/// Replaces the whole application with an error message and a reload button.
#[component]
pub fn FullPageErrorFallback(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="full-page">
            <p class="full-page-error">{message}</p>
            <button class="reload-button" on:click=|_| reload_page()>
                "Reload"
            </button>
        </div>
    }
}

fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().reload() {
        tracing::error!("Failed to reload page: {e:?}");
    }
}
