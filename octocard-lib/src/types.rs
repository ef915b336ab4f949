use serde::Deserialize;
use thiserror::Error;

/// A user's public profile as returned by `GET {base}/users/{login}`.
///
/// Constructed fresh per successful lookup and discarded on the next
/// request; nothing outlives a single render cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
    pub avatar_url: String,
    pub html_url: String,
}

impl ProfileRecord {
    /// Name shown on the card, falling back to the login when the profile
    /// carries no display name.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.login)
    }

    pub fn bio(&self) -> Option<&str> {
        non_empty(self.bio.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(self.company.as_deref())
    }

    /// Target for the website link: `blog` as-is when it already carries an
    /// http scheme, otherwise prefixed with `https://`.
    pub fn website_target(&self) -> Option<String> {
        let blog = non_empty(self.blog.as_deref())?;
        if blog.starts_with("http") {
            Some(blog.to_string())
        } else {
            Some(format!("https://{blog}"))
        }
    }
}

// The upstream API serializes absent text fields as null or "" depending on
// the field, so presence means non-empty after trimming.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Failure modes of a profile lookup. Every variant is terminal for the
/// triggering action; `Display` is the user-visible message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please enter a GitHub username.")]
    MissingUsername,

    #[error("User not found.")]
    NotFound,

    #[error("Network error: {status} {status_text} {body}")]
    BadStatus {
        status: u16,
        status_text: String,
        /// Best-effort response body; empty when unavailable.
        body: String,
    },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Network error: malformed profile response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The three-way taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    Validation,
    NotFound,
    Network,
}

impl LookupError {
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::MissingUsername => LookupErrorKind::Validation,
            LookupError::NotFound => LookupErrorKind::NotFound,
            LookupError::BadStatus { .. } | LookupError::Transport(_) | LookupError::Decode(_) => {
                LookupErrorKind::Network
            }
        }
    }
}
