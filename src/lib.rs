pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use app::{App, AppView};
pub use config::AppConfig;
pub use context::{use_session, SessionProvider, SessionStore};
pub use error::AuthError;
pub use services::Collaborators;
