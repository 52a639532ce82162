//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

use service_template::metrics::{PublishSettings, Publisher, PublisherConfig};
use service_template::config::FailurePolicy;

/// A request received by the mock collector.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct CollectorState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<Captured>>>,
}

/// A collector on an ephemeral port answering every POST with `status`.
pub struct MockCollector {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockCollector {
    pub fn url(&self) -> String {
        format!("http://{}/metrics", self.addr)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }

    /// Poll until at least `n` requests have arrived or `timeout` elapses.
    pub async fn wait_for(&self, n: usize, timeout: Duration) -> Vec<Captured> {
        let deadline = Instant::now() + timeout;
        loop {
            let requests = self.requests();
            if requests.len() >= n || Instant::now() >= deadline {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn collect(
    State(state): State<CollectorState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    state.requests.lock().unwrap().push(Captured { headers, body });
    if state.status.is_success() {
        (state.status, "")
    } else {
        (state.status, "invalid metric")
    }
}

pub async fn start_mock_collector(status: StatusCode) -> MockCollector {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/metrics", post(collect))
        .with_state(CollectorState {
            status,
            requests: requests.clone(),
        });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockCollector { addr, requests }
}

/// A collector that accepts connections and never answers.
pub async fn start_silent_collector() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

pub fn publisher_config(host: String) -> PublisherConfig {
    PublisherConfig {
        host,
        source: "ziggy".into(),
        user: "12345".into(),
        api_key: "secret".into(),
        environment: "development".into(),
    }
}

pub fn publisher(host: String, on_failure: FailurePolicy) -> Arc<Publisher> {
    let settings = PublishSettings {
        on_failure,
        ..PublishSettings::default()
    };
    Arc::new(Publisher::configure(publisher_config(host), settings).unwrap())
}
