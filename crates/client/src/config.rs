//! Client configuration loaded from environment variables.

/// Connection settings for the profile backend.
///
/// The default points at a locally running backend, suitable for
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base HTTP URL of the profile backend, without a trailing slash
    /// (default: `http://localhost:8080`).
    pub base_url: String,
}

/// Fallback base URL when `PROFILES_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                 |
    /// |--------------------|-------------------------|
    /// | `PROFILES_API_URL` | `http://localhost:8080` |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PROFILES_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    /// Build a config for an explicit base URL. A trailing slash is
    /// trimmed so request paths can always be appended as `/profiles`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}
