//! Pipeline configuration.
//!
//! The only external setting is the Alpha Vantage credential. It is read from
//! `STOCKSCOPE_ALPHAVANTAGE_API_KEY` (a `.env` file in the working directory is
//! loaded first). When the variable is missing or blank the pipeline runs with
//! the provider's public `demo` key, which only serves [`DEMO_SYMBOL`].

use std::fmt::{Debug, Formatter};

use tracing::debug;

pub const API_KEY_ENV: &str = "STOCKSCOPE_ALPHAVANTAGE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// The provider's demo key.
pub const DEMO_API_KEY: &str = "demo";
/// The one ticker the demo key serves.
pub const DEMO_SYMBOL: &str = "MSFT";

/// API credential; never printed in full.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credential {
    #[default]
    Demo,
    ApiKey(String),
}

impl Credential {
    /// Blank or literal `demo` keys fall back to [`Credential::Demo`].
    pub fn from_key(key: Option<String>) -> Self {
        match key.map(|key| key.trim().to_owned()) {
            Some(key) if !key.is_empty() && key != DEMO_API_KEY => Self::ApiKey(key),
            _ => Self::Demo,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Demo => DEMO_API_KEY,
            Self::ApiKey(key) => key,
        }
    }

    pub const fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demo => f.write_str("Demo"),
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub credential: Credential,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            credential: Credential::Demo,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl PipelineConfig {
    /// Load `.env` if present, then read the credential from the environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        let credential = Credential::from_key(std::env::var(API_KEY_ENV).ok());
        debug!(?credential, "resolved alphavantage credential");
        Self {
            credential,
            ..Self::default()
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
