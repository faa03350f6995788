//! Test helpers for end-to-end relay tests.
//!
//! Provides stub webhook and Steam API servers plus a running relay.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use chatrelay::{Config, EventServer, RelayPlugin};

/// Default timeout for test operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ALICE: u64 = 76561198000000000;
pub const BOB: u64 = 76561198000000001;

/// Webhook stub recording every body it receives.
pub struct WebhookStub {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl WebhookStub {
    /// Start a stub answering with `status`.
    pub async fn start(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let app = Router::new().route(
            "/hook",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    status
                }
            }),
        );

        Self {
            addr: serve(app).await,
            received,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    /// Bodies received so far.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    /// Wait until at least `count` bodies have arrived.
    pub async fn wait_for(&self, count: usize) -> Vec<Value> {
        let deadline = tokio::time::Instant::now() + DEFAULT_TIMEOUT;
        loop {
            let received = self.received();
            if received.len() >= count || tokio::time::Instant::now() >= deadline {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

/// Steam API stub serving `http://img/<steamid>.jpg` for every id,
/// except `BOB`, for whom it returns no players.
pub async fn start_steam_stub() -> SocketAddr {
    let app = Router::new().route(
        "/ISteamUser/GetPlayerSummaries/v2/",
        get(
            |Query(params): Query<std::collections::HashMap<String, String>>| async move {
                let steam_id = params.get("steamids").cloned().unwrap_or_default();
                if steam_id == BOB.to_string() {
                    return Json(json!({"response": {"players": []}}));
                }
                Json(json!({
                    "response": {"players": [{
                        "steamid": steam_id,
                        "avatarfull": format!("http://img/{steam_id}.jpg")
                    }]}
                }))
            },
        ),
    );
    serve(app).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Configuration pointing at the stubs, with the ingress on a random port.
pub fn test_config(webhook_url: &str, style: u8, steam_api: Option<SocketAddr>) -> Config {
    let mut config = Config::default();
    config.relay.webhook_url = webhook_url.to_string();
    config.relay.style = style;
    config.relay.timeout_secs = 5;
    if let Some(addr) = steam_api {
        config.relay.steam_api_key = "TESTKEY".to_string();
        config.profile.api_base_url = format!("http://{}", addr);
    }
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config
}

/// A running relay reachable over HTTP.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub plugin: Arc<RelayPlugin>,
    client: reqwest::Client,
}

impl TestRelay {
    pub async fn start(config: &Config) -> Self {
        let plugin = Arc::new(RelayPlugin::from_config(config).unwrap());
        let server = EventServer::new(&config.server, plugin.clone());
        let addr = server.run_with_addr().await.unwrap();

        Self {
            addr,
            plugin,
            client: reqwest::Client::new(),
        }
    }

    /// Post an event and return the status code and body.
    pub async fn post(&self, event: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("http://{}/events", self.addr))
            .json(&event)
            .send()
            .await
            .unwrap();

        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn chat(&self, steam_id: u64, name: &str, text: &str) -> Value {
        let (status, body) = self
            .post(json!({"type": "chat", "steam_id": steam_id, "name": name, "text": text}))
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        body
    }

    pub async fn connect(&self, steam_id: u64) {
        let (status, _) = self
            .post(json!({"type": "player_connect", "steam_id": steam_id}))
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }

    /// Wait until the cache holds an avatar for `steam_id`.
    pub async fn wait_for_avatar(&self, steam_id: u64) -> Option<String> {
        let deadline = tokio::time::Instant::now() + DEFAULT_TIMEOUT;
        loop {
            let avatar = self.plugin.cache().lookup(steam_id);
            if avatar.is_some() || tokio::time::Instant::now() >= deadline {
                return avatar;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// Wait until no lookup is in flight for `steam_id`.
    pub async fn wait_for_lookup(&self, steam_id: u64) {
        let deadline = tokio::time::Instant::now() + DEFAULT_TIMEOUT;
        while self.plugin.cache().is_pending(steam_id)
            && tokio::time::Instant::now() < deadline
        {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}
