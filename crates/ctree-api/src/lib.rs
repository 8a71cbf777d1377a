//! ctree-api — HTTP client for the coach search service.
//!
//! The service exposes one endpoint:
//!
//! ```text
//! GET {base_url}/api/coaches?query={q}&limit={n}
//! → {"response": [{"coach": "<id>", "name": "<display name>"}, ...]}
//! ```
//!
//! [`SearchClient`] takes its base URL at construction so tests can point it
//! at a fake server bound to a random local port. Every failure mode —
//! transport error, non-2xx status, unreadable or malformed body — is a
//! distinct [`ApiError`] variant for logging, but all of them collapse to
//! the single user-facing message [`ctree_core::SEARCH_FAILED_MSG`]; raw
//! error detail never reaches the screen.

use ctree_core::Coach;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a search attempt failed. Logged at debug level, never shown raw.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request uri: {0}")]
    Uri(#[from] hyper::http::uri::InvalidUri),
    #[error("http transport: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
    #[error("search service returned {0}")]
    Status(StatusCode),
    #[error("reading response body: {0}")]
    Body(#[from] hyper::Error),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Envelope the service wraps its matches in.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: Vec<Coach>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the coach search service.
///
/// Cheap to clone; the underlying hyper client pools connections.
#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    http: Client<HttpConnector, Empty<Bytes>>,
}

impl SearchClient {
    /// Build a client against the given base URL
    /// (e.g. `http://localhost:8000`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    /// Fetch coaches whose name matches `query`, at most `limit` of them.
    ///
    /// The service matches case-insensitively on name substring and returns
    /// matches ordered by name ascending.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Coach>, ApiError> {
        let uri: Uri = self.search_uri(query, limit).parse()?;
        tracing::debug!(%uri, "api: search request");

        let response = self.http.get(uri).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "api: non-success status");
            return Err(ApiError::Status(status));
        }

        let body = response.into_body().collect().await?.to_bytes();
        let envelope: SearchEnvelope = serde_json::from_slice(&body)?;
        tracing::debug!(count = envelope.response.len(), "api: search response");
        Ok(envelope.response)
    }

    fn search_uri(&self, query: &str, limit: u32) -> String {
        format!(
            "{}/api/coaches?query={}&limit={}",
            self.base_url,
            url_encode_component(query),
            limit
        )
    }
}

/// Percent-encode a query-string component: everything outside the
/// unreserved set is escaped.
fn url_encode_component(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len() + 8);
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(b));
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0F) as usize]));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
