//! HTTP client for the ordering backend API
//!
//! [`OrderingApi`] is the object-safe port the state containers talk to;
//! [`HttpClient`] is the reqwest-backed implementation. Tests substitute
//! a recording mock behind the same trait.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{
    AddOrderItemRequest, AuthTokens, CreateOrderRequest, GoogleLoginRequest, LoginRequest,
    OrderCreated, SignupRequest, StartSessionRequest, StartSessionResponse,
};
use shared::models::{Customer, MenuItem};
use shared::order::ServerOrder;
use std::sync::RwLock;

/// Header carrying the table session token
pub const SESSION_TOKEN_HEADER: &str = "X-Table-Session-Token";

/// Header carrying the tenant identifier
pub const TENANT_HEADER: &str = "X-Tenant-Id";

/// Ordering backend port
///
/// One shared handle serves every container, so the bearer token lives
/// behind interior mutability and session tokens are passed per call.
#[async_trait]
pub trait OrderingApi: Send + Sync {
    /// `POST /tables/{tableId}/start-session`
    async fn start_session(
        &self,
        table_id: &str,
        request: &StartSessionRequest,
    ) -> ClientResult<StartSessionResponse>;

    /// `POST /tables/{tableId}/orders/items`
    async fn add_order_item(
        &self,
        table_id: &str,
        session_token: &str,
        request: &AddOrderItemRequest,
    ) -> ClientResult<()>;

    /// `GET /tables/{tableId}/orders/current`
    async fn current_order(&self, table_id: &str, session_token: &str)
    -> ClientResult<ServerOrder>;

    /// `POST /tables/{tableId}/request-bill`
    async fn request_bill(&self, table_id: &str, session_token: &str) -> ClientResult<()>;

    /// `POST /customer/login`; the session token (when present) lets the
    /// backend link the table session to the account
    async fn login(
        &self,
        request: &LoginRequest,
        session_token: Option<&str>,
    ) -> ClientResult<AuthTokens>;

    /// `POST /customer/signup`
    async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthTokens>;

    /// `POST /customer/google`
    async fn login_with_google(
        &self,
        request: &GoogleLoginRequest,
        session_token: Option<&str>,
    ) -> ClientResult<AuthTokens>;

    /// `POST /customer/logout`
    async fn logout(&self) -> ClientResult<()>;

    /// `GET /customer/me`
    async fn current_customer(&self) -> ClientResult<Customer>;

    /// `GET /menu/items`
    async fn menu_items(&self) -> ClientResult<Vec<MenuItem>>;

    /// `POST /orders`
    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<OrderCreated>;

    /// Install or clear the bearer token used on authenticated calls
    fn set_bearer_token(&self, token: Option<String>);

    /// Currently installed bearer token
    fn bearer_token(&self) -> Option<String>;
}

/// reqwest-backed implementation of [`OrderingApi`]
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tenant_id: Option<String>,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tenant_id: config.tenant_id.clone(),
            token: RwLock::new(None),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn apply_headers(
        &self,
        mut request: reqwest::RequestBuilder,
        session_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = self.bearer_token() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(tenant) = &self.tenant_id {
            request = request.header(TENANT_HEADER, tenant);
        }
        if let Some(session) = session_token {
            request = request.header(SESSION_TOKEN_HEADER, session);
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session_token: Option<&str>,
    ) -> ClientResult<T> {
        let request = self.apply_headers(self.client.get(self.url(path)), session_token);
        Self::handle_response(request.send().await?).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        session_token: Option<&str>,
    ) -> ClientResult<T> {
        let request = self.apply_headers(self.client.post(self.url(path)).json(body), session_token);
        Self::handle_response(request.send().await?).await
    }

    async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        session_token: Option<&str>,
    ) -> ClientResult<T> {
        let request = self.apply_headers(self.client.post(self.url(path)), session_token);
        Self::handle_response(request.send().await?).await
    }

    /// Map HTTP status to error categories; success bodies parse as JSON
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl OrderingApi for HttpClient {
    async fn start_session(
        &self,
        table_id: &str,
        request: &StartSessionRequest,
    ) -> ClientResult<StartSessionResponse> {
        self.post_json(&format!("tables/{table_id}/start-session"), request, None)
            .await
    }

    async fn add_order_item(
        &self,
        table_id: &str,
        session_token: &str,
        request: &AddOrderItemRequest,
    ) -> ClientResult<()> {
        let _: serde_json::Value = self
            .post_json(
                &format!("tables/{table_id}/orders/items"),
                request,
                Some(session_token),
            )
            .await?;
        Ok(())
    }

    async fn current_order(
        &self,
        table_id: &str,
        session_token: &str,
    ) -> ClientResult<ServerOrder> {
        self.get_json(
            &format!("tables/{table_id}/orders/current"),
            Some(session_token),
        )
        .await
    }

    async fn request_bill(&self, table_id: &str, session_token: &str) -> ClientResult<()> {
        let _: serde_json::Value = self
            .post_empty(&format!("tables/{table_id}/request-bill"), Some(session_token))
            .await?;
        Ok(())
    }

    async fn login(
        &self,
        request: &LoginRequest,
        session_token: Option<&str>,
    ) -> ClientResult<AuthTokens> {
        self.post_json("customer/login", request, session_token)
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthTokens> {
        self.post_json("customer/signup", request, None).await
    }

    async fn login_with_google(
        &self,
        request: &GoogleLoginRequest,
        session_token: Option<&str>,
    ) -> ClientResult<AuthTokens> {
        self.post_json("customer/google", request, session_token)
            .await
    }

    async fn logout(&self) -> ClientResult<()> {
        let _: serde_json::Value = self.post_empty("customer/logout", None).await?;
        Ok(())
    }

    async fn current_customer(&self) -> ClientResult<Customer> {
        self.get_json("customer/me", None).await
    }

    async fn menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.get_json("menu/items", None).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<OrderCreated> {
        self.post_json("orders", request, None).await
    }

    fn set_bearer_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
