//! In-process stub of the TheTVDB endpoints for the client tests.
//!
//! The stub serves canned documents keyed by request path and records the
//! path and query of every request it receives, so tests can assert both on
//! the decoded records and on the requests the client issued.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tvdb_client::{ClientConfig, TvdbClient};

pub const API_KEY: &str = "0123456789ABCDEF";

struct StubState {
    documents: HashMap<String, &'static str>,
    requests: Mutex<Vec<String>>,
}

/// Fake TheTVDB server listening on a random local port
pub struct StubServer {
    base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Starts a stub answering each `(path, body)` pair with `200 OK`.
    /// Any other path gets `404 Not Found`.
    pub fn start(documents: &[(&str, &'static str)]) -> Self {
        let state = Arc::new(StubState {
            documents: documents
                .iter()
                .map(|(path, body)| (path.to_string(), *body))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let app = Router::new()
            .fallback(serve_document)
            .with_state(Arc::clone(&state));

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        StubServer {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client pointed at this stub, bypassing any proxy from the environment
    pub fn client(&self) -> TvdbClient {
        let config = ClientConfig::new(API_KEY)
            .unwrap()
            .with_base_url(&self.base_url)
            .unwrap();
        client_for(config)
    }

    /// Path and query of every request received so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Query pairs of the only request received so far
    pub fn single_query(&self) -> Vec<(String, String)> {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        query_pairs(&requests[0])
    }
}

pub fn client_for(config: ClientConfig) -> TvdbClient {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    TvdbClient::with_http_client(config, http)
}

/// Decodes the query of a recorded request target
pub fn query_pairs(target: &str) -> Vec<(String, String)> {
    let url = url::Url::parse(&format!("http://stub{target}")).unwrap();
    url.query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Strips the query from a recorded request target
pub fn path_of(target: &str) -> &str {
    target.split('?').next().unwrap_or(target)
}

pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

async fn serve_document(State(state): State<Arc<StubState>>, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|target| target.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.requests.lock().unwrap().push(target);

    match state.documents.get(uri.path()) {
        Some(body) => ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], *body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
