use std::fmt;
use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

impl FetchMetadata {
    /// True when the body came from a different URL than the one requested.
    pub fn redirected(&self) -> bool {
        match Url::parse(&self.original_url) {
            Ok(requested) => requested.as_str() != self.final_url,
            Err(_) => self.original_url != self.final_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Client,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Client => write!(f, "http client setup failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a single URL produced no document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("invalid page url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("response for {0} contained no markup")]
    EmptyDocument(String),
}

/// The URL list file itself could not be used. Aborts the whole invocation.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("url list not found: {0}")]
    Missing(PathBuf),
    #[error("failed to read url list {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress of a sequential batch, reported per URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    Started {
        index: usize,
        total: usize,
        url: String,
    },
    Succeeded {
        index: usize,
        url: String,
        content_chars: usize,
    },
    Failed {
        index: usize,
        url: String,
        reason: String,
    },
}
