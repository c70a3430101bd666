//! LabSeq service endpoint configuration constants and types.

/// Configuration for the LabSeq REST client
/// (This is the runtime struct handed to the request adapter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Extra attempts after the first failure
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API.base_url.to_string(),
            timeout_ms: API.client.timeout_ms,
            retries: API.client.retries,
            backoff_ms: API.client.backoff_ms,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms.max(1);
        self
    }
}

/// Paths relative to the base URL
pub struct Endpoints {
    /// Prefix for `GET {prefix}/{index}`
    pub sequence_prefix: &'static str,
    pub health: &'static str,
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

/// The Master API Configuration
pub struct ApiConfig {
    pub base_url: &'static str,
    /// Environment variable that overrides `base_url` on the command line
    pub base_url_env: &'static str,
    pub endpoints: Endpoints,
    pub client: ClientDefaults,
    pub user_agent: &'static str,
}

pub const API: ApiConfig = ApiConfig {
    base_url: "http://localhost:8080",
    base_url_env: "LABSEQ_API_URL",
    endpoints: Endpoints {
        sequence_prefix: "/labseq",
        health: "/labseq/health",
    },
    client: ClientDefaults {
        timeout_ms: 30_000,
        // One immediate resubmission on failure
        retries: 1,
        backoff_ms: 0,
    },
    user_agent: concat!("labseq-client/", env!("CARGO_PKG_VERSION")),
};

/// Path for a single sequence lookup
pub fn sequence_path(index: u64) -> String {
    format!("{}/{}", API.endpoints.sequence_prefix, index)
}
