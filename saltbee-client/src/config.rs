//! Client configuration

/// Configuration for connecting to the ordering backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Tenant identifier sent as `X-Tenant-Id` on table endpoints
    pub tenant_id: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            tenant_id: None,
            timeout: 30,
        }
    }

    /// Read configuration from the environment
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SALTBEE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            tenant_id: std::env::var("SALTBEE_TENANT_ID").ok(),
            timeout: std::env::var("SALTBEE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Set the tenant identifier
    pub fn with_tenant_id(mut self, tenant: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
