use std::rc::Rc;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::{AuthForm, User, UserEnvelope};
use crate::services::{ApiClient, RequestConfig, TokenStore};

/// Authentication operations the session provider delegates to.
#[async_trait(?Send)]
pub trait AuthClient {
    /// Persisted credential, if any. Never touches the network.
    fn get_token(&self) -> Option<String>;
    async fn login(&self, form: &AuthForm) -> Result<User, AuthError>;
    /// `None` when the server created the account without logging it in.
    async fn register(&self, form: &AuthForm) -> Result<Option<User>, AuthError>;
    async fn logout(&self) -> Result<(), AuthError>;
}

/// Auth client talking to the `login` / `register` endpoints of the API.
pub struct HttpAuthClient {
    api: Rc<dyn ApiClient>,
    tokens: Rc<dyn TokenStore>,
}

impl HttpAuthClient {
    pub fn new(api: Rc<dyn ApiClient>, tokens: Rc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// POST the form; an empty success body yields `None`.
    async fn submit(&self, endpoint: &str, form: &AuthForm) -> Result<Option<User>, AuthError> {
        form.validate()?;
        let body = serde_json::to_value(form)?;
        let response = self
            .api
            .request(endpoint, RequestConfig::post(body))
            .await?;
        if response.is_null() {
            return Ok(None);
        }
        let envelope: UserEnvelope = serde_json::from_value(response)?;
        self.persist(envelope.user).map(Some)
    }

    /// Store the credential carried by a fresh user record.
    fn persist(&self, user: User) -> Result<User, AuthError> {
        self.tokens.set(user.token.as_deref().unwrap_or_default())?;
        Ok(user)
    }
}

#[async_trait(?Send)]
impl AuthClient for HttpAuthClient {
    fn get_token(&self) -> Option<String> {
        self.tokens.get().filter(|token| !token.is_empty())
    }

    async fn login(&self, form: &AuthForm) -> Result<User, AuthError> {
        self.submit("login", form)
            .await?
            .ok_or_else(|| AuthError::Decode("login response carried no user".to_string()))
    }

    async fn register(&self, form: &AuthForm) -> Result<Option<User>, AuthError> {
        self.submit("register", form).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.tokens.remove()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::{json, Value};

    use super::*;
    use crate::services::MemoryTokenStore;

    /// Replays one canned response and records each call.
    struct ScriptedApi {
        response: Result<Value, AuthError>,
        calls: RefCell<Vec<(String, RequestConfig)>>,
    }

    impl ScriptedApi {
        fn new(response: Result<Value, AuthError>) -> Rc<Self> {
            Rc::new(Self {
                response,
                calls: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl ApiClient for ScriptedApi {
        async fn request(&self, endpoint: &str, config: RequestConfig) -> Result<Value, AuthError> {
            self.calls.borrow_mut().push((endpoint.to_string(), config));
            self.response.clone()
        }
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_login_persists_token_and_returns_user() {
        let api = ScriptedApi::new(Ok(json!({"user": {"id": 1, "name": "Ann", "token": "abc123"}})));
        let tokens = Rc::new(MemoryTokenStore::default());
        let client = HttpAuthClient::new(api.clone(), tokens.clone());

        let user = block_on(client.login(&AuthForm::new("ann", "pw"))).unwrap();

        assert_eq!(user.name, "Ann");
        assert_eq!(tokens.get().as_deref(), Some("abc123"));
        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "login");
        assert_eq!(calls[0].1.method, reqwest::Method::POST);
        assert_eq!(
            calls[0].1.data,
            Some(json!({"username": "ann", "password": "pw"}))
        );
    }

    #[test]
    fn test_register_with_user_body_logs_in() {
        let api = ScriptedApi::new(Ok(json!({"user": {"id": 2, "token": "t2"}})));
        let tokens = Rc::new(MemoryTokenStore::default());
        let client = HttpAuthClient::new(api.clone(), tokens.clone());

        let user = block_on(client.register(&AuthForm::new("bo", "pw"))).unwrap();

        assert_eq!(user.map(|u| u.id), Some(2));
        assert_eq!(tokens.get().as_deref(), Some("t2"));
        assert_eq!(api.calls.borrow()[0].0, "register");
    }

    #[test]
    fn test_register_with_empty_body_returns_no_user() {
        let api = ScriptedApi::new(Ok(Value::Null));
        let tokens = Rc::new(MemoryTokenStore::default());
        let client = HttpAuthClient::new(api, tokens.clone());

        let user = block_on(client.register(&AuthForm::new("bo", "pw"))).unwrap();

        assert!(user.is_none());
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_login_with_empty_body_is_decode_error() {
        let api = ScriptedApi::new(Ok(Value::Null));
        let client = HttpAuthClient::new(api, Rc::new(MemoryTokenStore::default()));

        let result = block_on(client.login(&AuthForm::new("ann", "pw")));

        assert!(matches!(result, Err(AuthError::Decode(_))));
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let api = ScriptedApi::new(Ok(Value::Null));
        let client = HttpAuthClient::new(api.clone(), Rc::new(MemoryTokenStore::default()));

        let result = block_on(client.login(&AuthForm::new("", "pw")));

        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_server_rejection_leaves_token_untouched() {
        let api = ScriptedApi::new(Err(AuthError::Server {
            status: 400,
            message: "wrong password".to_string(),
        }));
        let tokens = Rc::new(MemoryTokenStore::with_token("old"));
        let client = HttpAuthClient::new(api, tokens.clone());

        let result = block_on(client.login(&AuthForm::new("ann", "bad")));

        assert_eq!(
            result,
            Err(AuthError::Server {
                status: 400,
                message: "wrong password".to_string()
            })
        );
        assert_eq!(tokens.get().as_deref(), Some("old"));
    }

    #[test]
    fn test_malformed_response_is_decode_error() {
        let api = ScriptedApi::new(Ok(json!({"id": 1})));
        let client = HttpAuthClient::new(api, Rc::new(MemoryTokenStore::default()));

        let result = block_on(client.login(&AuthForm::new("ann", "pw")));

        assert!(matches!(result, Err(AuthError::Decode(_))));
    }

    #[test]
    fn test_logout_removes_token() {
        let tokens = Rc::new(MemoryTokenStore::with_token("abc123"));
        let client = HttpAuthClient::new(ScriptedApi::new(Ok(Value::Null)), tokens.clone());

        block_on(client.logout()).unwrap();

        assert!(client.get_token().is_none());
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_empty_stored_token_counts_as_absent() {
        let client = HttpAuthClient::new(
            ScriptedApi::new(Ok(Value::Null)),
            Rc::new(MemoryTokenStore::with_token("")),
        );
        assert!(client.get_token().is_none());
    }
}
