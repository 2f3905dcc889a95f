use std::fmt;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["https://tariffsolver.com", "http://localhost:3000"];
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// Credential for the text-generation API. Absence is reported per request.
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub anthropic_max_tokens: u32,
    pub upstream_timeout_secs: u64,
    /// Frontend origins allowed by CORS. A single `*` means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            anthropic_api_key: None,
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            anthropic_model: DEFAULT_MODEL.to_string(),
            anthropic_max_tokens: DEFAULT_MAX_TOKENS,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("anthropic_model", &self.anthropic_model)
            .field("anthropic_max_tokens", &self.anthropic_max_tokens)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Anthropic Base URL: {}", config.anthropic_base_url);
        tracing::debug!("Model: {}", config.anthropic_model);
        tracing::debug!("CORS origins: {:?}", config.cors_allowed_origins);
        tracing::debug!("Server Port: {}", config.port);
        if config.anthropic_api_key.is_none() {
            tracing::warn!("ANTHROPIC_API_KEY is not set; classification requests will fail");
        }

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
                None => defaults.port,
            },
            anthropic_api_key: var("ANTHROPIC_API_KEY").map(|key| key.trim().to_string()),
            anthropic_base_url: match var("ANTHROPIC_BASE_URL") {
                Some(raw) => {
                    let parsed = url::Url::parse(raw.trim()).map_err(|e| {
                        anyhow::anyhow!("ANTHROPIC_BASE_URL is not a valid URL: {}", e)
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("ANTHROPIC_BASE_URL must start with http:// or https://");
                    }
                    raw.trim().trim_end_matches('/').to_string()
                }
                None => defaults.anthropic_base_url,
            },
            anthropic_model: var("ANTHROPIC_MODEL")
                .map(|m| m.trim().to_string())
                .unwrap_or(defaults.anthropic_model),
            anthropic_max_tokens: match var("ANTHROPIC_MAX_TOKENS") {
                Some(raw) => raw
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        anyhow::anyhow!("ANTHROPIC_MAX_TOKENS must be a positive integer")
                    })?,
                None => defaults.anthropic_max_tokens,
            },
            upstream_timeout_secs: match var("UPSTREAM_TIMEOUT_SECS") {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be a positive integer")
                    })?,
                None => defaults.upstream_timeout_secs,
            },
            cors_allowed_origins: match var("CORS_ALLOWED_ORIGINS") {
                Some(raw) => {
                    let origins: Vec<String> = raw
                        .split(',')
                        .map(|o| o.trim().trim_end_matches('/').to_string())
                        .filter(|o| !o.is_empty())
                        .collect();
                    if origins.is_empty() {
                        anyhow::bail!("CORS_ALLOWED_ORIGINS cannot be empty");
                    }
                    origins
                }
                None => defaults.cors_allowed_origins,
            },
            max_body_bytes: match var("MAX_BODY_BYTES") {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a valid number"))?,
                None => defaults.max_body_bytes,
            },
        })
    }

    /// True when CORS should answer every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}
