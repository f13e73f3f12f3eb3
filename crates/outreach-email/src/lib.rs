//! `outreach-email`: the SMTP campaign channel.
//!
//! One campaign cycle maps to one delivery session: a STARTTLS connection to
//! the configured relay, authenticated with the account password. Within a
//! session every recipient is attempted independently; a bounced or rejected
//! recipient never aborts the rest of the list.

pub mod adapter;
pub mod message;

pub use adapter::EmailChannel;
