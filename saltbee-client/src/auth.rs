//! Customer authentication
//!
//! Owns the access token and the customer profile. Logging out never
//! touches the table session; a customer can hand the table back to
//! guest mode while the session keeps running.

use crate::error::ClientResult;
use crate::http::OrderingApi;
use crate::storage::{KeyValueStore, keys, read_key, write_key};
use shared::client::{AuthTokens, GoogleLoginRequest, LoginRequest, SignupRequest};
use shared::models::Customer;
use std::sync::Arc;

/// What a successful login did besides authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginSummary {
    /// The active table session got linked to this account
    pub session_linked: bool,
}

/// Customer auth manager
pub struct AuthManager {
    api: Arc<dyn OrderingApi>,
    store: Arc<dyn KeyValueStore>,
    customer: Option<Customer>,
}

impl AuthManager {
    pub fn new(api: Arc<dyn OrderingApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            store,
            customer: None,
        }
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }

    /// Re-validate a stored access token and load the profile. A token
    /// the backend no longer honors is cleared.
    pub async fn restore(&mut self) {
        let Some(token) = read_key(&*self.store, keys::AUTH_TOKEN) else {
            return;
        };
        self.api.set_bearer_token(Some(token));

        match self.api.current_customer().await {
            Ok(customer) => self.customer = Some(customer),
            Err(err) => {
                tracing::warn!(error = %err, "stored auth token rejected");
                self.api.set_bearer_token(None);
                write_key(&*self.store, keys::AUTH_TOKEN, None);
                self.customer = None;
            }
        }
    }

    /// Log in with email and password. Passing the active table session
    /// token lets the backend link the session to the account.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        session_token: Option<&str>,
    ) -> ClientResult<LoginSummary> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let tokens = self.api.login(&request, session_token).await?;
        self.install(&tokens).await?;
        Ok(LoginSummary {
            session_linked: tokens.session_linked,
        })
    }

    /// Create an account and log in
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let tokens = self.api.signup(&request).await?;
        self.install(&tokens).await?;
        Ok(())
    }

    /// Log in with a Google id token; remembers that Google sign-in was
    /// used on this device.
    pub async fn login_with_google(
        &mut self,
        id_token: &str,
        session_token: Option<&str>,
    ) -> ClientResult<LoginSummary> {
        let request = GoogleLoginRequest {
            id_token: id_token.to_string(),
        };
        let tokens = self.api.login_with_google(&request, session_token).await?;
        self.install(&tokens).await?;
        write_key(&*self.store, keys::GOOGLE_AUTH_USED, Some("true"));
        Ok(LoginSummary {
            session_linked: tokens.session_linked,
        })
    }

    /// Whether Google sign-in was used on this device before
    pub fn has_used_google_auth(&self) -> bool {
        read_key(&*self.store, keys::GOOGLE_AUTH_USED).as_deref() == Some("true")
    }

    /// Customer logout: the backend call is best-effort, local auth state
    /// always clears, the table session stays untouched.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "logout call failed; clearing local auth anyway");
        }
        self.api.set_bearer_token(None);
        write_key(&*self.store, keys::AUTH_TOKEN, None);
        self.customer = None;
    }

    async fn install(&mut self, tokens: &AuthTokens) -> ClientResult<()> {
        write_key(&*self.store, keys::AUTH_TOKEN, Some(&tokens.access_token));
        self.api.set_bearer_token(Some(tokens.access_token.clone()));

        // Fetch the full profile immediately
        let customer = self.api.current_customer().await?;
        self.customer = Some(customer);
        Ok(())
    }
}
