pub mod authenticated_app;
pub mod full_page;
pub mod unauthenticated_app;

pub use authenticated_app::AuthenticatedApp;
pub use full_page::{FullPageErrorFallback, FullPageLoading};
pub use unauthenticated_app::UnauthenticatedApp;
