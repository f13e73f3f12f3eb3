//! `outreach-core`: configuration and shared types for the outreach bot.
//!
//! Holds the process-wide [`config::BotConfig`] (loaded once in `main` and
//! passed explicitly to every subsystem, never an ambient global), the
//! [`recipient::Recipient`] encoding used by the mailing list, and the
//! crate-spanning error type.

pub mod config;
pub mod error;
pub mod recipient;

pub use config::BotConfig;
pub use error::{OutreachError, Result};
pub use recipient::Recipient;
