pub mod auth_provider;
pub mod http;
pub mod query_cache;
pub mod token_store;

use std::rc::Rc;

pub use auth_provider::{AuthClient, HttpAuthClient};
pub use http::{request_json, ApiClient, HttpClient, RequestConfig};
pub use query_cache::{QueryCache, QueryClient};
pub use token_store::{browser_token_store, LocalStorageTokenStore, MemoryTokenStore, TokenStore};

use crate::config::AppConfig;

/// External collaborators the session provider is constructed with.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Rc<dyn AuthClient>,
    pub api: Rc<dyn ApiClient>,
    pub cache: Rc<dyn QueryCache>,
}

impl Collaborators {
    pub fn new(
        auth: Rc<dyn AuthClient>,
        api: Rc<dyn ApiClient>,
        cache: Rc<dyn QueryCache>,
    ) -> Self {
        Self { auth, api, cache }
    }

    /// Real implementations backed by localStorage and `fetch`, sharing one
    /// query cache between the HTTP client and logout.
    pub fn browser(config: &AppConfig) -> Self {
        let tokens = browser_token_store(&config.token_key);
        let cache = Rc::new(QueryClient::new());
        let api: Rc<dyn ApiClient> = Rc::new(HttpClient::new(
            config,
            Rc::clone(&tokens),
            Rc::clone(&cache),
        ));
        let auth = Rc::new(HttpAuthClient::new(Rc::clone(&api), tokens));
        Self::new(auth, api, cache)
    }
}
