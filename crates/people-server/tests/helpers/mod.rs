//! Harness for the end-to-end suite.
//!
//! By default each test starts its own server on an ephemeral port backed by
//! an in-memory store. Set `PEOPLE_E2E_BASE_URL` to run the same suite
//! against an already running server instead.

use std::{net::Ipv4Addr, sync::Arc, time::Duration};

use people_server::{IN_MEMORY, ServerConfig};
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

pub struct TestServer {
  pub base_url: String,
  pub client:   Client,
  /// `true` when the server was started by this test and its store is
  /// empty at the start.
  pub isolated: bool,
}

impl TestServer {
  pub async fn start() -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .expect("http client");

    if let Ok(url) = std::env::var("PEOPLE_E2E_BASE_URL") {
      return Self {
        base_url: url.trim_end_matches('/').to_string(),
        client,
        isolated: false,
      };
    }

    let config = ServerConfig {
      store_path: IN_MEMORY.into(),
      ..Default::default()
    };
    let store = people_server::open_store(&config)
      .await
      .expect("in-memory store");
    let app = people_server::app(Arc::new(store), &config);

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
      .await
      .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
      if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server error: {e}");
      }
    });

    Self {
      base_url: format!("http://{addr}"),
      client,
      isolated: true,
    }
  }

  pub fn url(&self, path: &str) -> String { format!("{}{path}", self.base_url) }

  pub async fn get(&self, path: &str) -> Response {
    self.client.get(self.url(path)).send().await.expect("GET")
  }

  pub async fn post_json(&self, path: &str, body: &Value) -> Response {
    self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .expect("POST")
  }

  pub async fn put_json(&self, path: &str, body: &Value) -> Response {
    self
      .client
      .put(self.url(path))
      .json(body)
      .send()
      .await
      .expect("PUT")
  }

  pub async fn delete(&self, path: &str) -> Response {
    self.client.delete(self.url(path)).send().await.expect("DELETE")
  }

  /// Create `body` and return the assigned uuid.
  pub async fn create(&self, body: &Value) -> String {
    let resp = self.post_json("/people", body).await;
    assert!(
      matches!(resp.status(), StatusCode::OK | StatusCode::CREATED),
      "create failed: {}",
      resp.status()
    );
    let body: Value = resp.json().await.expect("json body");
    body["rows"][0]["uuid"]
      .as_str()
      .expect("uuid string in first row")
      .to_string()
  }
}

/// A well-typed person payload.
pub fn passenger(name: &str) -> Value {
  json!({
    "survived": 1,
    "pclass": 3,
    "name": name,
    "sex": "female",
    "age": 22,
    "siblings_spouses_abroad": 0,
    "parents_children_abroad": 0,
    "fare": 7.25
  })
}

pub fn assert_client_error(status: StatusCode) {
  assert!(status.is_client_error(), "expected 4xx, got {status}");
}

pub fn assert_json(resp: &Response) {
  let ct = resp
    .headers()
    .get(reqwest::header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default();
  assert!(ct.starts_with("application/json"), "Content-Type: {ct:?}");
}
