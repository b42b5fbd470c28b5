use std::env;

use crate::services::assembler::InclusionPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub store_url: String,
    pub store_key: String,
    pub store_timeout_secs: u64,

    /// Persist values of exactly zero instead of treating them as "not entered"
    pub record_explicit_zeros: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let store_url = http_url("SUPABASE_URL", required("SUPABASE_URL")?)?;
        let store_key = required("SUPABASE_KEY")?;

        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: "must be a number".into(),
            })?,
            None => 8080,
        };

        // Used verbatim as the CORS allowed origin
        let frontend_url = http_url(
            "FRONTEND_URL",
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".into()),
        )?;
        if axum::http::HeaderValue::from_str(&frontend_url).is_err() {
            return Err(ConfigError::Invalid {
                name: "FRONTEND_URL",
                reason: "not a valid origin header value".into(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            frontend_url,

            store_url,
            store_key,
            store_timeout_secs: lookup("STORE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            record_explicit_zeros: lookup("RECORD_EXPLICIT_ZEROS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn inclusion_policy(&self) -> InclusionPolicy {
        if self.record_explicit_zeros {
            InclusionPolicy::Explicit
        } else {
            InclusionPolicy::PositiveOnly
        }
    }
}

/// Parse `value` as an absolute http(s) URL, returning it unchanged.
fn http_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    let parsed = reqwest::Url::parse(&value).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(value)
}
