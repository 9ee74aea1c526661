use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub sender: String,
    pub message: String,
    pub recipients: Vec<String>,
}

impl MessageRequest {
    /// Rules beyond the JSON shape. Returns the reason for the first one broken.
    /// `sender` only matters outside sandbox mode.
    pub fn validate(&self, use_sandbox: bool) -> Result<(), String> {
        if !use_sandbox && self.sender.trim().is_empty() {
            return Err("sender must not be empty".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("message must not be empty".to_string());
        }
        if self.recipients.is_empty() {
            return Err("recipients must contain at least one number".to_string());
        }
        if let Some(i) = self.recipients.iter().position(|r| r.trim().is_empty()) {
            return Err(format!("recipients[{}] must not be empty", i));
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct SendResponse {
    pub status: String,
    pub detail: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
}
