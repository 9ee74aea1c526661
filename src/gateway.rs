use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub sid: String,
    pub status: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request to gateway failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP {status} error: {message}{}", code_suffix(code))]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("unexpected gateway response: {0}")]
    Decode(String),
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" (code {})", c)).unwrap_or_default()
}

/// Outbound side of the relay. One instance is shared by every request.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn create_message(
        &self,
        body: &str,
        from: &str,
        to: &str,
    ) -> Result<MessageReceipt, GatewayError>;
}

#[derive(Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

pub struct TwilioClient {
    http: reqwest::Client,
    messages_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            messages_url: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.api_base, config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
        }
    }
}

fn api_error(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => GatewayError::Api {
            status,
            code: err.code,
            message: err.message,
        },
        Err(_) => GatewayError::Api {
            status,
            code: None,
            message: body.trim().to_string(),
        },
    }
}

#[async_trait]
impl MessageGateway for TwilioClient {
    async fn create_message(
        &self,
        body: &str,
        from: &str,
        to: &str,
    ) -> Result<MessageReceipt, GatewayError> {
        let res = self
            .http
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("Body", body), ("From", from), ("To", to)])
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = res.status();
        let text = res.text().await.map_err(GatewayError::Transport)?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let resource: MessageResource =
            serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(MessageReceipt {
            sid: resource.sid,
            status: resource.status,
        })
    }
}
