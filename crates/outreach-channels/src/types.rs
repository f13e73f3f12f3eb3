use serde::{Deserialize, Serialize};

use outreach_core::Recipient;

/// The payload of one campaign cycle.
///
/// Composed fresh per cycle and discarded after dispatch; channels decide how
/// to render it (the email channel adds a per-recipient greeting and an HTML
/// alternative, stubs log a preview).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignMessage {
    pub subject: String,
    pub body: String,
}

/// Per-recipient delivery result, recorded in list order.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub recipient: Recipient,
    pub success: bool,
    /// Failure detail when `success` is false.
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn delivered(recipient: Recipient) -> Self {
        Self {
            recipient,
            success: true,
            error: None,
        }
    }

    pub fn failed(recipient: Recipient, error: impl Into<String>) -> Self {
        Self {
            recipient,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate result of one channel's campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignResult {
    pub attempted: usize,
    pub succeeded: usize,
}

impl CampaignResult {
    pub fn from_outcomes(outcomes: &[DeliveryOutcome]) -> Self {
        Self {
            attempted: outcomes.len(),
            succeeded: outcomes.iter().filter(|o| o.success).count(),
        }
    }

    /// A campaign counts as successful when at least one delivery went
    /// through, even if others failed.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }
}
