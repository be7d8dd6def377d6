#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Command;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Json, Response},
    routing::post,
};
use reqwest::Response as ClientResponse;
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

use jotter_server::{
    client::SummaryClient,
    models::{client::InferenceConfig, state::JotterState},
    store::MemoryNoteStore,
};

pub const MODEL: &str = "facebook/bart-large-cnn";

/// Pass successful responses through and turn anything else into an error
/// carrying the status and body.
pub async fn ensure_success(response: ClientResponse) -> Result<ClientResponse, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
    Err(format!("{status}: {body}"))
}

/// Drop and recreate the test database with the crate's migrations. Refuses
/// to touch any database not named `test`.
pub fn reset_test_database(database_url: &str) -> Result<(), String> {
    if database_url.rsplit('/').next() != Some("test") {
        return Err(format!("{database_url} isn't a test database"));
    }
    let migrations_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let output = Command::new("diesel")
        .arg("database")
        .arg("reset")
        .arg("--database-url")
        .arg(database_url)
        .arg("--migration-dir")
        .arg(&migrations_dir)
        .output()
        .map_err(|err| format!("couldn't run the diesel CLI: {err}"))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

/// Serve a router on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> Result<String, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let _ = tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(format!("http://{addr}"))
}

/// What the fake inference API answers with.
#[derive(Clone)]
pub enum StubReply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

/// A request the fake inference API received.
#[derive(Clone, Debug)]
pub struct StubRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    delay: Duration,
    requests: Arc<Mutex<Vec<StubRequest>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

pub struct InferenceStub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<StubRequest>>>,
    max_in_flight: Arc<AtomicUsize>,
}

impl InferenceStub {
    /// Most requests the stub was ever answering at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

async fn stub_inference(
    State(stub): State<StubState>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    stub.requests.lock().await.push(StubRequest {
        path: uri.path().to_string(),
        authorization,
        body,
    });

    let in_flight = stub.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stub.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
    tokio::time::sleep(stub.delay).await;
    stub.in_flight.fetch_sub(1, Ordering::SeqCst);

    match stub.reply {
        StubReply::Json(status, value) => (status, Json(value)).into_response(),
        StubReply::Text(status, text) => (status, text).into_response(),
    }
}

/// Start a fake inference API that always gives the same reply.
pub async fn spawn_inference_stub(
    reply: StubReply,
) -> Result<InferenceStub, Box<dyn std::error::Error>> {
    spawn_slow_inference_stub(reply, Duration::ZERO).await
}

/// Start a fake inference API that waits `delay` before every reply.
pub async fn spawn_slow_inference_stub(
    reply: StubReply,
    delay: Duration,
) -> Result<InferenceStub, Box<dyn std::error::Error>> {
    let requests = Arc::new(Mutex::new(vec![]));
    let max_in_flight = Arc::new(AtomicUsize::new(0));
    let state = StubState {
        reply,
        delay,
        requests: requests.clone(),
        in_flight: Arc::new(AtomicUsize::new(0)),
        max_in_flight: max_in_flight.clone(),
    };
    let router = Router::new()
        .route("/models/{*model}", post(stub_inference))
        .with_state(state);
    let base_url = serve(router).await?;
    Ok(InferenceStub {
        base_url: format!("{base_url}/models"),
        requests,
        max_in_flight,
    })
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> Result<String, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/models"))
}

pub fn inference_config(base_url: &str, api_key: Option<&str>) -> InferenceConfig {
    InferenceConfig {
        base_url: base_url.to_string(),
        model: MODEL.to_string(),
        api_key: api_key.map(str::to_string),
    }
}

/// Serve the full API over an in-memory store and return the `/api` URL.
pub async fn serve_api(
    inference_base_url: &str,
    api_key: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let summary_client = SummaryClient::new(inference_config(inference_base_url, api_key))?;
    let state = JotterState::new(Arc::new(MemoryNoteStore::new()), summary_client);
    let base_url = serve(jotter_server::router(state)).await?;
    Ok(format!("{base_url}/api"))
}
