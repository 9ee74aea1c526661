use log::{error, info};

use crate::address::channel_address;
use crate::gateway::{GatewayError, MessageGateway};

#[derive(Debug, PartialEq, Eq)]
pub struct BulkOutcome {
    pub sent: usize,
}

/// The first recipient the gateway refused. Recipients after it were never tried.
#[derive(Debug, thiserror::Error)]
#[error("Error sending to {recipient}: {source}")]
pub struct BulkError {
    pub recipient: String,
    pub delivered: usize,
    #[source]
    pub source: GatewayError,
}

/// Sends `body` to each recipient in order, stopping at the first failure.
pub async fn send_bulk(
    gateway: &dyn MessageGateway,
    body: &str,
    from: &str,
    recipients: &[String],
) -> Result<BulkOutcome, BulkError> {
    for (delivered, recipient) in recipients.iter().enumerate() {
        let to = channel_address(recipient);
        match gateway.create_message(body, from, &to).await {
            Ok(receipt) => info!(
                "Message {} queued for {} (status: {})",
                receipt.sid,
                to,
                receipt.status.as_deref().unwrap_or("unknown")
            ),
            Err(e) => {
                error!(
                    "Sending to {} failed after {} of {} delivered: {}",
                    to,
                    delivered,
                    recipients.len(),
                    e
                );
                return Err(BulkError {
                    recipient: recipient.clone(),
                    delivered,
                    source: e,
                });
            }
        }
    }

    Ok(BulkOutcome {
        sent: recipients.len(),
    })
}
