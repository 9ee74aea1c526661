use log::info;

pub const CHANNEL_PREFIX: &str = "whatsapp:";

/// Twilio's shared WhatsApp sandbox number.
pub const SANDBOX_SENDER: &str = "whatsapp:+14155238886";

/// Prefixes `number` with the channel tag. An existing tag in any case is
/// normalized to lowercase rather than doubled.
pub fn channel_address(number: &str) -> String {
    let number = number.trim();
    let bare = match number.get(..CHANNEL_PREFIX.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(CHANNEL_PREFIX) => &number[CHANNEL_PREFIX.len()..],
        _ => number,
    };
    format!("{}{}", CHANNEL_PREFIX, bare)
}

/// Picks the `From` address used for every message of one request.
pub fn resolve_sender(requested: &str, use_sandbox: bool) -> String {
    if use_sandbox {
        info!(
            "Sandbox mode: sending from {} (ignoring requested sender {:?})",
            SANDBOX_SENDER, requested
        );
        SANDBOX_SENDER.to_string()
    } else {
        channel_address(requested)
    }
}
