use leptos::prelude::*;

use portal_ui::{logging, App, AppConfig, Collaborators, SessionProvider};

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();

    if let Err(e) = logging::setup_logging(&config.log_filter) {
        web_sys::console::warn_1(&format!("Warning: Failed to setup logging: {e}").into());
    }

    tracing::info!("Starting portal against {}", config.api_url);

    let collaborators = Collaborators::browser(&config);

    leptos::mount::mount_to_body(move || {
        view! {
            <SessionProvider collaborators=collaborators>
                <App />
            </SessionProvider>
        }
    });
}
