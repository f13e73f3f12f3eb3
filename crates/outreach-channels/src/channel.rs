use async_trait::async_trait;

use crate::{error::ChannelError, types::CampaignMessage, types::CampaignResult};

/// Common interface implemented by every outreach channel (email, Facebook
/// groups, community sites, …).
///
/// Implementations must be `Send + Sync` so they can be stored in a
/// [`ChannelSet`](crate::set::ChannelSet) and driven from the engine task.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Stable lowercase identifier for this channel (e.g. `"email"`).
    ///
    /// Used as the key in logs and in per-cycle outcome reports.
    fn name(&self) -> &str;

    /// Whether this channel is enabled in the loaded config.
    ///
    /// A disabled channel is never asked to deliver; the
    /// [`ChannelSet`](crate::set::ChannelSet) logs the skip instead.
    fn enabled(&self) -> bool;

    /// Deliver one campaign message to everyone this channel reaches.
    ///
    /// Returns `Err` only for failures that prevented the whole campaign
    /// (session establishment, empty audience). Per-recipient failures are
    /// absorbed into the returned [`CampaignResult`].
    async fn deliver(&self, message: &CampaignMessage) -> Result<CampaignResult, ChannelError>;
}
