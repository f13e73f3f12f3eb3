use tracing::{info, warn};

use crate::{
    channel::Channel,
    error::ChannelError,
    types::{CampaignMessage, CampaignResult},
};

/// What one channel did with one cycle's message.
#[derive(Debug)]
pub struct ChannelOutcome {
    pub channel: String,
    pub result: Result<CampaignResult, ChannelError>,
}

/// Ordered collection of channel adapters.
///
/// Channels are dispatched sequentially in registration order, one cycle at a
/// time. A channel whose session fails is recorded and the remaining channels
/// still run.
pub struct ChannelSet {
    channels: Vec<Box<dyn Channel>>,
}

impl ChannelSet {
    /// Create an empty set with no registered channels.
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Register a channel adapter. Dispatch order follows registration order.
    pub fn register(&mut self, channel: Box<dyn Channel>) {
        info!(channel = %channel.name(), "registering channel adapter");
        self.channels.push(channel);
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Deliver one message through every enabled channel.
    ///
    /// Disabled channels are logged and skipped without an outcome entry.
    /// Outcomes are returned in dispatch order.
    pub async fn deliver_all(&self, message: &CampaignMessage) -> Vec<ChannelOutcome> {
        let mut outcomes = Vec::new();

        for channel in &self.channels {
            let name = channel.name();
            if !channel.enabled() {
                info!(channel = %name, "channel disabled in config, skipping");
                continue;
            }

            let result = channel.deliver(message).await;
            match &result {
                Ok(r) => info!(
                    channel = %name,
                    attempted = r.attempted,
                    succeeded = r.succeeded,
                    "channel delivery finished"
                ),
                Err(e) => warn!(channel = %name, error = %e, "channel delivery failed"),
            }
            outcomes.push(ChannelOutcome {
                channel: name.to_string(),
                result,
            });
        }

        outcomes
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeChannel {
        name: &'static str,
        enabled: bool,
        fail_session: bool,
        deliveries: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Channel for FakeChannel {
        fn name(&self) -> &str {
            self.name
        }

        fn enabled(&self) -> bool {
            self.enabled
        }

        async fn deliver(
            &self,
            _message: &CampaignMessage,
        ) -> Result<CampaignResult, ChannelError> {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            if self.fail_session {
                return Err(ChannelError::Session("auth rejected".into()));
            }
            Ok(CampaignResult {
                attempted: 2,
                succeeded: 2,
            })
        }
    }

    fn fake(
        name: &'static str,
        enabled: bool,
        fail_session: bool,
    ) -> (Box<dyn Channel>, Arc<AtomicUsize>) {
        let deliveries = Arc::new(AtomicUsize::new(0));
        let ch = FakeChannel {
            name,
            enabled,
            fail_session,
            deliveries: Arc::clone(&deliveries),
        };
        (Box::new(ch), deliveries)
    }

    fn message() -> CampaignMessage {
        CampaignMessage {
            subject: "Hello".into(),
            body: "A friendly note".into(),
        }
    }

    #[tokio::test]
    async fn disabled_channels_are_skipped() {
        let mut set = ChannelSet::new();
        let (ch, count) = fake("email", false, false);
        set.register(ch);

        let outcomes = set.deliver_all(&message()).await;
        assert!(outcomes.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failing_channel_does_not_block_the_rest() {
        let mut set = ChannelSet::new();
        let (bad, _) = fake("facebook", true, true);
        let (good, good_count) = fake("email", true, false);
        set.register(bad);
        set.register(good);

        let outcomes = set.deliver_all(&message()).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].channel, "facebook");
        assert!(outcomes[0].result.is_err());
        assert_eq!(outcomes[1].channel, "email");
        assert!(outcomes[1].result.is_ok());
        assert_eq!(good_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn outcomes_follow_registration_order() {
        let mut set = ChannelSet::new();
        for name in ["facebook", "email", "community_sites"] {
            let (ch, _) = fake(name, true, false);
            set.register(ch);
        }

        let outcomes = set.deliver_all(&message()).await;
        let names: Vec<_> = outcomes.iter().map(|o| o.channel.as_str()).collect();
        assert_eq!(names, ["facebook", "email", "community_sites"]);
    }
}
