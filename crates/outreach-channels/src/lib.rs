//! `outreach-channels`: the delivery channel abstraction.
//!
//! A campaign cycle produces one [`CampaignMessage`] and hands it to every
//! enabled channel through the [`ChannelSet`]. Channels are isolated from each
//! other: one channel failing its whole session never blocks the rest, and a
//! channel reports partial success through its [`CampaignResult`].

pub mod channel;
pub mod error;
pub mod set;
pub mod stubs;
pub mod types;

pub use channel::Channel;
pub use error::ChannelError;
pub use set::{ChannelOutcome, ChannelSet};
pub use types::{CampaignMessage, CampaignResult, DeliveryOutcome};
