//! Scripted collaborators for exercising the session store without a browser.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use portal_ui::error::AuthError;
use portal_ui::models::{AuthForm, User};
use portal_ui::services::{ApiClient, AuthClient, QueryCache, RequestConfig};
use portal_ui::{Collaborators, SessionStore};

pub fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: String::new(),
        title: String::new(),
        organization: String::new(),
        token: Some(format!("token-{id}")),
    }
}

pub fn me_body(id: u64, name: &str) -> Value {
    json!({ "user": { "id": id, "name": name } })
}

pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

pub struct FakeAuth {
    pub token: RefCell<Option<String>>,
    pub login_result: RefCell<Result<User, AuthError>>,
    pub register_result: RefCell<Result<Option<User>, AuthError>>,
    pub logout_result: RefCell<Result<(), AuthError>>,
    pub logins: RefCell<Vec<AuthForm>>,
    pub registrations: RefCell<Vec<AuthForm>>,
    pub logouts: Cell<usize>,
}

impl FakeAuth {
    pub fn new(token: Option<&str>) -> Rc<Self> {
        Rc::new(Self {
            token: RefCell::new(token.map(str::to_string)),
            login_result: RefCell::new(Ok(user(1, "Ann"))),
            register_result: RefCell::new(Ok(Some(user(2, "Bo")))),
            logout_result: RefCell::new(Ok(())),
            logins: RefCell::new(Vec::new()),
            registrations: RefCell::new(Vec::new()),
            logouts: Cell::new(0),
        })
    }
}

#[async_trait(?Send)]
impl AuthClient for FakeAuth {
    fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    async fn login(&self, form: &AuthForm) -> Result<User, AuthError> {
        self.logins.borrow_mut().push(form.clone());
        self.login_result.borrow().clone()
    }

    async fn register(&self, form: &AuthForm) -> Result<Option<User>, AuthError> {
        self.registrations.borrow_mut().push(form.clone());
        self.register_result.borrow().clone()
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.logouts.set(self.logouts.get() + 1);
        let result = self.logout_result.borrow().clone();
        if result.is_ok() {
            self.token.borrow_mut().take();
        }
        result
    }
}

/// Records `(endpoint, token)` for each request and answers with a canned
/// response, or with whatever is sent through a held channel.
pub struct FakeApi {
    pub response: RefCell<Result<Value, AuthError>>,
    pub calls: RefCell<Vec<(String, Option<String>)>>,
    held: RefCell<Option<oneshot::Receiver<Result<Value, AuthError>>>>,
}

impl FakeApi {
    pub fn new(response: Result<Value, AuthError>) -> Rc<Self> {
        Rc::new(Self {
            response: RefCell::new(response),
            calls: RefCell::new(Vec::new()),
            held: RefCell::new(None),
        })
    }

    /// Make the next request wait for the returned sender.
    pub fn hold(&self) -> oneshot::Sender<Result<Value, AuthError>> {
        let (tx, rx) = oneshot::channel();
        *self.held.borrow_mut() = Some(rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl ApiClient for FakeApi {
    async fn request(&self, endpoint: &str, config: RequestConfig) -> Result<Value, AuthError> {
        self.calls
            .borrow_mut()
            .push((endpoint.to_string(), config.token.clone()));

        let held = self.held.borrow_mut().take();
        if let Some(rx) = held {
            return rx
                .await
                .unwrap_or_else(|_| Err(AuthError::Network("request abandoned".to_string())));
        }
        self.response.borrow().clone()
    }
}

#[derive(Default)]
pub struct CountingCache {
    pub clears: Cell<usize>,
}

impl QueryCache for CountingCache {
    fn invalidate_all(&self) {
        self.clears.set(self.clears.get() + 1);
    }
}

pub struct Harness {
    pub auth: Rc<FakeAuth>,
    pub api: Rc<FakeApi>,
    pub cache: Rc<CountingCache>,
    pub store: SessionStore,
}

impl Harness {
    pub fn new(token: Option<&str>, me: Result<Value, AuthError>) -> Self {
        let auth = FakeAuth::new(token);
        let api = FakeApi::new(me);
        let cache = Rc::new(CountingCache::default());
        let store = SessionStore::new(Collaborators::new(
            auth.clone(),
            api.clone(),
            cache.clone(),
        ));
        Self {
            auth,
            api,
            cache,
            store,
        }
    }

    /// Store whose bootstrap already settled to "logged out".
    pub async fn logged_out() -> Self {
        let harness = Self::new(None, Ok(Value::Null));
        harness.store.bootstrap().await;
        harness
    }

    /// Store whose bootstrap already restored user 1 ("Ann").
    pub async fn logged_in() -> Self {
        let harness = Self::new(Some("abc123"), Ok(me_body(1, "Ann")));
        harness.store.bootstrap().await;
        harness
    }
}
