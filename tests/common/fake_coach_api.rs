//! Fake coach search service for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /api/coaches?query={q}&limit={n}` — filtered roster, wrapped in
//!   the real service's `{"response": [...]}` envelope
//!
//! Filter semantics mirror the production service: case-insensitive
//! substring match on the display name, ordered by name ascending,
//! truncated to `limit` (default 10). The server records every request's
//! `(query, limit)` pair and can be switched into failure or garbage-body
//! modes to exercise the client's error collapse.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeCoachApi::start().await.unwrap();
//! api.add_coach("BillWalsh", "Bill Walsh").await;
//!
//! // Point a SearchClient at api.base_url()
//! let client = ctree_api::SearchClient::new(api.base_url());
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// What the server should do with the next requests.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
enum Mode {
    #[default]
    Ok,
    /// Respond 500 to every request.
    Fail,
    /// Respond 200 with a body that is not the expected envelope.
    Garbage,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    /// `(id, name)` roster the filter runs over.
    roster: Vec<(String, String)>,
    mode: Mode,
    /// Every `(query, limit)` pair received, in arrival order.
    requests: Vec<(String, u32)>,
}

/// Handle to the running fake coach API server.
pub struct FakeCoachApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeCoachApi {
    /// Start the fake server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/api/coaches", get(search_coaches))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Add a coach to the roster the filter runs over.
    pub async fn add_coach(&self, id: &str, name: &str) {
        let mut state = self.state.lock().await;
        state.roster.push((id.to_string(), name.to_string()));
    }

    /// Seed the roster from `(id, name)` pairs.
    pub async fn seed(&self, roster: Vec<(String, String)>) {
        let mut state = self.state.lock().await;
        state.roster.extend(roster);
    }

    /// Make every following request fail with a 500.
    pub async fn fail_requests(&self, fail: bool) {
        let mut state = self.state.lock().await;
        state.mode = if fail { Mode::Fail } else { Mode::Ok };
    }

    /// Make every following request return 200 with a non-envelope body.
    pub async fn garbage_body(&self) {
        let mut state = self.state.lock().await;
        state.mode = Mode::Garbage;
    }

    /// Every `(query, limit)` pair received so far, in arrival order.
    pub async fn requests(&self) -> Vec<(String, u32)> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

fn default_limit() -> u32 {
    10
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
    #[serde(default = "default_limit")]
    limit: u32,
}

async fn search_coaches(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests.push((params.query.clone(), params.limit));

    match state.mode {
        Mode::Fail => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
        }
        Mode::Garbage => return (StatusCode::OK, "<html>not json</html>").into_response(),
        Mode::Ok => {}
    }

    let needle = params.query.to_lowercase();
    let mut matches: Vec<&(String, String)> = state
        .roster
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| a.1.cmp(&b.1));
    matches.truncate(params.limit as usize);

    let coaches: Vec<serde_json::Value> = matches
        .into_iter()
        .map(|(id, name)| serde_json::json!({ "coach": id, "name": name }))
        .collect();

    axum::Json(serde_json::json!({ "response": coaches })).into_response()
}
