use std::cell::Cell;

use crate::escape::encode_path_segment;
use crate::types::{LookupError, ProfileRecord};

/// Default REST endpoint the lookup talks to.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Trims raw input and rejects empty usernames before any network work.
pub fn validate_username(raw: &str) -> Result<&str, LookupError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LookupError::MissingUsername);
    }
    Ok(trimmed)
}

/// Builds the lookup URL for a validated login.
pub fn lookup_url(base_url: &str, login: &str) -> String {
    format!(
        "{}/users/{}",
        base_url.trim_end_matches('/'),
        encode_path_segment(login)
    )
}

/// Maps an HTTP response status onto the lookup error taxonomy.
///
/// `body` is best-effort error context; pass an empty string when it could
/// not be read.
pub fn classify_status(status: u16, status_text: &str, body: &str) -> Result<(), LookupError> {
    if status == 404 {
        return Err(LookupError::NotFound);
    }
    if !(200..300).contains(&status) {
        return Err(LookupError::BadStatus {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        });
    }
    Ok(())
}

/// Parses a success body into a profile record. Success is all-or-nothing:
/// a malformed body surfaces as a network-kind failure, never as a partial
/// profile.
pub fn parse_profile(body: &str) -> Result<ProfileRecord, LookupError> {
    Ok(serde_json::from_str(body)?)
}

/// Orders overlapping lookups. Each trigger takes the next generation, and
/// a continuation only publishes its result while its generation is still
/// current; stale responses are discarded instead of racing for the
/// display area.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    current: Cell<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new lookup, invalidating every earlier generation.
    pub fn begin(&self) -> u64 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current.get() == generation
    }
}
