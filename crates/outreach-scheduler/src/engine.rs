use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

use outreach_channels::{CampaignMessage, ChannelOutcome, ChannelSet};
use outreach_core::BotConfig;

use crate::{compose, gate};

/// Fixed wait after a failed cycle before the next attempt.
pub const CYCLE_BACKOFF: Duration = Duration::from_secs(300);

/// Upper bound (exclusive) on the per-cycle jitter, in whole minutes.
const JITTER_MINUTES: u64 = 30;

/// What one cycle did.
#[derive(Debug)]
pub enum CycleReport {
    /// The gate was closed; nothing was composed or dispatched. The next
    /// cycle waits the normal interval; a skip is not rescheduled early.
    Skipped,
    /// The cycle ran; one outcome per enabled channel, in dispatch order.
    Completed(Vec<ChannelOutcome>),
}

impl CycleReport {
    /// A cycle counts as failed when any channel failed its whole campaign
    /// (session-level error). Partial per-recipient failures do not.
    pub fn failed(&self) -> bool {
        match self {
            CycleReport::Skipped => false,
            CycleReport::Completed(outcomes) => outcomes.iter().any(|o| o.result.is_err()),
        }
    }
}

/// Drives repeated campaign cycles.
///
/// Owns the config and channel set for the life of the process. The RNG in
/// the type parameter feeds both template choice and wait jitter; production
/// uses [`StdRng`], tests inject a seeded one.
pub struct CampaignEngine<R: Rng = StdRng> {
    config: Arc<BotConfig>,
    channels: ChannelSet,
    rng: R,
}

impl CampaignEngine<StdRng> {
    pub fn new(config: Arc<BotConfig>, channels: ChannelSet) -> Self {
        Self::with_rng(config, channels, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> CampaignEngine<R> {
    pub fn with_rng(config: Arc<BotConfig>, channels: ChannelSet, rng: R) -> Self {
        Self {
            config,
            channels,
            rng,
        }
    }

    /// Whether a cycle starting at `now` may post.
    ///
    /// `respect_quiet_hours = false` bypasses the gate entirely.
    fn gate_open(&self, now: DateTime<Local>) -> bool {
        !self.config.posting_schedule.respect_quiet_hours || gate::is_outreach_time(now)
    }

    /// Run one complete campaign cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        info!("starting campaign cycle");

        if !self.gate_open(Local::now()) {
            info!("not an optimal time for senior outreach, skipping this cycle");
            return CycleReport::Skipped;
        }

        let body = compose::compose(&self.config, None, &mut self.rng);
        let subject = format!("A friendly hello from {}", self.config.business_name);
        let message = CampaignMessage { subject, body };

        let outcomes = self.channels.deliver_all(&message).await;
        info!(channels = outcomes.len(), "campaign cycle completed");
        CycleReport::Completed(outcomes)
    }

    /// Drive cycles until `shutdown` broadcasts `true`.
    ///
    /// Every wait is interruptible by shutdown; an in-flight cycle is not
    /// (delivery to a slow relay finishes before the signal is observed).
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("campaign engine started");

        loop {
            let report = self.run_cycle().await;

            let wait = if report.failed() {
                warn!(
                    backoff_secs = CYCLE_BACKOFF.as_secs(),
                    "cycle failed, backing off before the next attempt"
                );
                CYCLE_BACKOFF
            } else {
                let wait = next_wait(self.config.posting_schedule.frequency_hours, &mut self.rng);
                info!(
                    hours = wait.as_secs() / 3600,
                    minutes = (wait.as_secs() % 3600) / 60,
                    "waiting until next cycle"
                );
                wait
            };

            tokio::select! {
                _ = sleep(wait) => {}
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("campaign engine shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// Inter-cycle wait: the configured cadence plus 0–29 whole minutes of
/// jitter, re-drawn on every call so repeated cycles never synchronise.
pub fn next_wait<R: Rng>(frequency_hours: u64, rng: &mut R) -> Duration {
    let jitter_minutes = rng.gen_range(0..JITTER_MINUTES);
    Duration::from_secs(frequency_hours * 3600 + jitter_minutes * 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, hour, 30, 0).unwrap()
    }

    fn engine_with(respect_quiet_hours: bool) -> CampaignEngine<StdRng> {
        let mut config = BotConfig::default();
        config.posting_schedule.respect_quiet_hours = respect_quiet_hours;
        CampaignEngine::with_rng(
            Arc::new(config),
            ChannelSet::new(),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn gate_respects_quiet_hours_by_default() {
        let engine = engine_with(true);
        assert!(engine.gate_open(local_at_hour(10)));
        assert!(!engine.gate_open(local_at_hour(23)));
        assert!(!engine.gate_open(local_at_hour(12)));
    }

    #[test]
    fn gate_bypass_when_quiet_hours_disabled() {
        let engine = engine_with(false);
        assert!(engine.gate_open(local_at_hour(3)));
    }

    #[test]
    fn next_wait_stays_within_the_jitter_band() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let wait = next_wait(24, &mut rng);
            assert!(wait >= Duration::from_secs(24 * 3600));
            assert!(wait < Duration::from_secs(24 * 3600 + 30 * 60));
        }
    }

    #[test]
    fn next_wait_jitter_is_not_degenerate() {
        let mut rng = StdRng::seed_from_u64(2);
        let draws: std::collections::HashSet<u64> =
            (0..50).map(|_| next_wait(24, &mut rng).as_secs()).collect();
        assert!(draws.len() > 1, "jitter never varies");
    }

    #[test]
    fn skipped_cycle_is_not_a_failure() {
        assert!(!CycleReport::Skipped.failed());
        assert!(!CycleReport::Completed(Vec::new()).failed());
    }

    #[test]
    fn session_failure_marks_the_cycle_failed() {
        use outreach_channels::{CampaignResult, ChannelError};
        let outcomes = vec![
            ChannelOutcome {
                channel: "email".into(),
                result: Err(ChannelError::Session("auth rejected".into())),
            },
            ChannelOutcome {
                channel: "facebook".into(),
                result: Ok(CampaignResult {
                    attempted: 0,
                    succeeded: 0,
                }),
            },
        ];
        assert!(CycleReport::Completed(outcomes).failed());
    }
}
