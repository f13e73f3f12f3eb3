// Drive the persistent loop under paused virtual time: cycles must repeat at
// the jittered cadence and the shutdown signal must end the loop cleanly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;

use outreach_channels::{
    CampaignMessage, CampaignResult, Channel, ChannelError, ChannelSet,
};
use outreach_core::BotConfig;
use outreach_scheduler::CampaignEngine;

struct CountingChannel {
    deliveries: Arc<AtomicUsize>,
}

#[async_trait]
impl Channel for CountingChannel {
    fn name(&self) -> &str {
        "counting"
    }

    fn enabled(&self) -> bool {
        true
    }

    async fn deliver(&self, _message: &CampaignMessage) -> Result<CampaignResult, ChannelError> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        Ok(CampaignResult {
            attempted: 1,
            succeeded: 1,
        })
    }
}

#[tokio::test(start_paused = true)]
async fn loop_repeats_cycles_and_stops_on_shutdown() {
    let mut config = BotConfig::default();
    config.posting_schedule.frequency_hours = 1;
    // Bypass the wall-clock gate so the test is independent of when it runs.
    config.posting_schedule.respect_quiet_hours = false;

    let deliveries = Arc::new(AtomicUsize::new(0));
    let mut channels = ChannelSet::new();
    channels.register(Box::new(CountingChannel {
        deliveries: Arc::clone(&deliveries),
    }));

    let engine = CampaignEngine::with_rng(
        Arc::new(config),
        channels,
        StdRng::seed_from_u64(11),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(engine.run(shutdown_rx));

    // Each inter-cycle wait is in [1h, 1h30m); three hours of virtual time
    // fit at least the immediate first cycle plus one more.
    tokio::time::sleep(std::time::Duration::from_secs(3 * 3600)).await;
    assert!(
        deliveries.load(Ordering::SeqCst) >= 2,
        "expected at least two cycles, got {}",
        deliveries.load(Ordering::SeqCst)
    );

    shutdown_tx.send(true).unwrap();
    handle.await.expect("engine task must exit cleanly");
}
