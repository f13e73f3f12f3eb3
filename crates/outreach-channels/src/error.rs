use thiserror::Error;

/// Errors that are fatal to one channel's campaign.
///
/// Per-recipient delivery failures are *not* represented here; they are
/// recovered inside the channel and recorded as
/// [`DeliveryOutcome`](crate::types::DeliveryOutcome) entries.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The delivery session could not be established (connection or
    /// authentication failure). No per-recipient attempts were made.
    #[error("Session failed: {0}")]
    Session(String),

    /// The channel has nothing to deliver to.
    #[error("Recipient list is empty")]
    NoRecipients,

    /// The channel-specific configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}
