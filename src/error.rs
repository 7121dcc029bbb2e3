use std::io;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a single scrape → generate → publish run can fail.
#[derive(Debug, Error)]
pub enum Error {
    // ── input ──
    #[error("invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    // ── scrape ──
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    // ── generate ──
    #[error("completion request rejected: invalid or missing API key")]
    Unauthorized,

    #[error("completion request rejected: quota or rate limit exceeded")]
    QuotaExceeded,

    #[error("completion API returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("completion request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    // ── publish ──
    #[error("failed to launch {program:?}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Transport or HTTP-status failure while fetching the source page.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Fetch { .. } | Error::Status { .. })
    }

    /// Which part of the run produced the error, for operator diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            e if e.is_network() => "scrape",
            e if e.is_generation() => "generate",
            Error::InvalidUrl(_) | Error::UnsupportedScheme(_) | Error::InvalidProjectName { .. } => {
                "input"
            }
            _ => "publish",
        }
    }

    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized
                | Error::QuotaExceeded
                | Error::Api { .. }
                | Error::Transport(_)
                | Error::MalformedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let status = Error::Status {
            url: "https://example.com".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(status.is_network());
        assert!(!status.is_generation());

        assert!(Error::QuotaExceeded.is_generation());
        assert!(Error::MalformedResponse("no choices".into()).is_generation());
        assert!(!Error::Io(io::Error::other("disk full")).is_network());

        assert_eq!(status.stage(), "scrape");
        assert_eq!(Error::Unauthorized.stage(), "generate");
        assert_eq!(Error::Io(io::Error::other("disk full")).stage(), "publish");
        assert_eq!(Error::UnsupportedScheme("ftp".into()).stage(), "input");
    }

    #[test]
    fn status_message_names_url() {
        let e = Error::Status {
            url: "https://example.com/p".into(),
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(e.to_string(), "https://example.com/p returned HTTP 502 Bad Gateway");
    }
}
