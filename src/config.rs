use std::fmt;

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Settings read once at startup and handed to the router and gateway.
#[derive(Clone)]
pub struct Config {
    pub account_sid: String,
    pub auth_token: String,
    pub use_sandbox: bool,
    pub allowed_origin: HeaderValue,
    pub port: u16,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> anyhow::Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{} must be set", key))
        };

        let account_sid = required("TWILIO_ACCOUNT_SID")?;
        let auth_token = required("TWILIO_AUTH_TOKEN")?;

        // Anything but "true" switches to the caller's own sender.
        let use_sandbox = lookup("USE_SANDBOX")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let origin = lookup("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin = HeaderValue::from_str(origin.trim())
            .with_context(|| format!("ALLOWED_ORIGIN is not a valid origin: {:?}", origin))?;

        let port = lookup("WHATSAPP_API_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_base = lookup("TWILIO_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            account_sid,
            auth_token,
            use_sandbox,
            allowed_origin,
            port,
            api_base,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("use_sandbox", &self.use_sandbox)
            .field("allowed_origin", &self.allowed_origin)
            .field("port", &self.port)
            .field("api_base", &self.api_base)
            .finish()
    }
}
