//! Placeholder adapters for platforms without a real integration yet.
//!
//! Both log what they would post and report an empty campaign. They exist so
//! the cycle flow (and the config's enablement flags) exercise the same
//! [`Channel`] seam a real integration would plug into.

use async_trait::async_trait;
use tracing::info;

use crate::{
    channel::Channel,
    error::ChannelError,
    types::{CampaignMessage, CampaignResult},
};

/// First N characters of the body, for log previews.
fn preview(body: &str) -> String {
    body.chars().take(50).collect()
}

/// Facebook group posting. Requires Graph API setup, currently a stub.
pub struct FacebookChannel {
    enabled: bool,
}

impl FacebookChannel {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl Channel for FacebookChannel {
    fn name(&self) -> &str {
        "facebook"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn deliver(&self, message: &CampaignMessage) -> Result<CampaignResult, ChannelError> {
        info!("Facebook posting would happen here");
        info!(preview = %preview(&message.body), "message preview");
        Ok(CampaignResult {
            attempted: 0,
            succeeded: 0,
        })
    }
}

/// Senior community forum posting, currently a stub.
pub struct CommunitySitesChannel {
    enabled: bool,
}

impl CommunitySitesChannel {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl Channel for CommunitySitesChannel {
    fn name(&self) -> &str {
        "community_sites"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn deliver(&self, message: &CampaignMessage) -> Result<CampaignResult, ChannelError> {
        info!("community site posting would happen here");
        info!(preview = %preview(&message.body), "message preview");
        Ok(CampaignResult {
            attempted: 0,
            succeeded: 0,
        })
    }
}
