//! `outreach-scheduler`: the campaign scheduling-and-dispatch loop.
//!
//! # Overview
//!
//! One campaign cycle is: time-window gate check → compose a message →
//! deliver through every enabled channel → record results. The
//! [`engine::CampaignEngine`] drives cycles either once (manual run) or in a
//! persistent loop with a jittered inter-cycle wait, a fixed backoff after a
//! failed cycle, and clean shutdown through a `tokio::sync::watch` channel.
//!
//! # Cadence
//!
//! | Situation        | Next wait                                   |
//! |------------------|---------------------------------------------|
//! | Normal cycle     | `frequency_hours` + 0–29 min jitter, re-drawn every cycle |
//! | Gate closed      | Same as a normal cycle (no early retry)      |
//! | Cycle failed     | Fixed 5 minutes                              |

pub mod compose;
pub mod engine;
pub mod gate;

pub use engine::{CampaignEngine, CycleReport};
