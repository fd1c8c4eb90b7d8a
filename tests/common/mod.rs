//! Common test utilities

#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use fintech_core::{StoreClient, StoreConfig};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};

/// In-process stand-in for the remote store, bound to an ephemeral port.
pub struct TestStore {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestStore {
    pub async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    /// Store whose `/execute` always answers with a fixed status and body
    pub async fn responding(status: StatusCode, body: &'static str) -> Self {
        let app = Router::new().route(
            "/execute",
            post(move || async move {
                (status, [("content-type", "application/json")], body)
            }),
        );
        Self::spawn(app).await
    }

    pub fn client(&self, timeout: Duration) -> StoreClient {
        StoreClient::new(StoreConfig::new(self.base_url.clone(), timeout))
            .expect("failed to build store client")
    }
}

impl Drop for TestStore {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// URL of a local port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A log event emitted by this crate, with its fields rendered as text
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub fields: String,
}

/// Tracing layer that records events whose target is this crate
#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

struct FieldWriter<'a>(&'a mut String);

impl Visit for FieldWriter<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push_str(&format!("{}={:?} ", field.name(), value));
    }
}

impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("fintech_core") {
            return;
        }

        let mut fields = String::new();
        event.record(&mut FieldWriter(&mut fields));

        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            fields,
        });
    }
}
