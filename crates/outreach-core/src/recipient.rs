//! The `"Name <address>"` recipient encoding used by the mailing list.
//!
//! Parsing is best-effort and never fails: a malformed entry degrades to
//! whatever address text can be extracted rather than aborting a campaign.

use std::fmt;

/// Greeting name used when a recipient entry carries no display name.
///
/// Never stored on the [`Recipient`] itself: only produced by
/// [`Recipient::display_name`] at use time, so "no name supplied" and
/// "name set to the placeholder" stay distinguishable.
pub const DEFAULT_GREETING_NAME: &str = "Friend";

/// One entry of the mailing list.
///
/// Duplicates are allowed in a recipient list; the list keeps whatever the
/// config (or `add_recipient`) appended, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Display name, if one was supplied.
    pub name: Option<String>,
    /// Bare email address.
    pub address: String,
}

impl Recipient {
    pub fn new(name: Option<&str>, address: &str) -> Self {
        Self {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            address: address.trim().to_string(),
        }
    }

    /// Parse a raw list entry.
    ///
    /// `"Mary Johnson <mary@example.com>"` splits on the first `<`: the left
    /// part (trimmed) is the name, the text up to the first following `>`
    /// (trimmed) is the address. An entry without `<` is a bare address with
    /// no name. A missing closing `>` takes the rest of the string as the
    /// address.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('<') {
            Some((name, rest)) => {
                let address = match rest.split_once('>') {
                    Some((addr, _)) => addr,
                    None => rest,
                };
                Self::new(Some(name), address)
            }
            None => Self::new(None, raw),
        }
    }

    /// Name to greet this recipient by: the stored name, or
    /// [`DEFAULT_GREETING_NAME`] when none was supplied.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_GREETING_NAME)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}
