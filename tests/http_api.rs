//! End-to-end tests against a live server on an ephemeral port.

#![allow(clippy::panic)]

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use viridata_backend::app_state::AppState;
use viridata_backend::config::{CorsOrigins, SmtpConfig};
use viridata_backend::notify::ContactNotifier;
use viridata_backend::persistence::{CONTACT_SUBMISSIONS, DocumentStore, MemoryStore};
use viridata_backend::server::build_app;

struct TestServer {
    base: String,
    store: Arc<MemoryStore>,
    client: reqwest::Client,
}

async fn spawn_server() -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let shared: Arc<dyn DocumentStore> = Arc::clone(&store) as Arc<dyn DocumentStore>;
    let state = AppState::new(shared, ContactNotifier::from_config(SmtpConfig::default()));
    let app = build_app(state, &CorsOrigins::Any);

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer {
        base: format!("http://{addr}"),
        store,
        client: reqwest::Client::new(),
    }
}

impl TestServer {
    async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        let Ok(response) = self
            .client
            .post(format!("{}{path}", self.base))
            .json(body)
            .send()
            .await
        else {
            panic!("request to {path} failed");
        };
        response
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let Ok(response) = self.client.get(format!("{}{path}", self.base)).send().await else {
            panic!("request to {path} failed");
        };
        let status = response.status().as_u16();
        let Ok(body) = response.json::<Value>().await else {
            panic!("{path} did not return JSON");
        };
        (status, body)
    }
}

#[tokio::test]
async fn greeting_and_health() {
    let server = spawn_server().await;

    let (status, body) = server.get_json("/api/").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "Hello World"}));

    let (status, body) = server.get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn status_round_trip_through_the_store() {
    let server = spawn_server().await;

    let response = server
        .post("/api/status", &json!({"client_name": "round-trip"}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let Ok(created) = response.json::<Value>().await else {
        panic!("expected JSON");
    };

    let (status, listed) = server.get_json("/api/status").await;
    assert_eq!(status, 200);
    let Some(items) = listed.as_array() else {
        panic!("expected an array");
    };
    assert_eq!(items.len(), 1);
    let Some(item) = items.first() else {
        panic!("expected one item");
    };
    assert_eq!(item["id"], created["id"]);
    assert_eq!(item["client_name"], "round-trip");
    assert!(item.get("_id").is_none());

    let (Some(listed_ts), Some(created_ts)) =
        (item["timestamp"].as_str(), created["timestamp"].as_str())
    else {
        panic!("timestamps should be strings");
    };
    let (Ok(listed_ts), Ok(created_ts)) = (
        chrono::DateTime::parse_from_rfc3339(listed_ts),
        chrono::DateTime::parse_from_rfc3339(created_ts),
    ) else {
        panic!("timestamps should be RFC 3339");
    };
    assert_eq!(listed_ts, created_ts);
}

#[tokio::test]
async fn fifty_concurrent_posts_get_fifty_ids() {
    let server = spawn_server().await;

    let responses = join_all((0..50).map(|i| {
        let server = &server;
        async move {
            server
                .post("/api/status", &json!({"client_name": format!("client-{i}")}))
                .await
        }
    }))
    .await;

    let mut ids = HashSet::new();
    for response in responses {
        assert_eq!(response.status().as_u16(), 200);
        let Ok(body) = response.json::<Value>().await else {
            panic!("expected JSON");
        };
        let Some(id) = body["id"].as_str() else {
            panic!("id should be a string");
        };
        ids.insert(id.to_string());
    }
    assert_eq!(ids.len(), 50);

    let (_, listed) = server.get_json("/api/status").await;
    assert_eq!(listed.as_array().map(Vec::len), Some(50));
}

#[tokio::test]
async fn contact_submission_is_stored() {
    let server = spawn_server().await;

    let response = server
        .post(
            "/api/contact",
            &json!({
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "company": "Navy",
                "message": "Found a bug.",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let Ok(body) = response.json::<Value>().await else {
        panic!("expected JSON");
    };
    assert_eq!(body["success"], true);
    assert_eq!(server.store.count(CONTACT_SUBMISSIONS).await, 1);

    let response = server
        .post("/api/contact", &json!({"name": "Grace Hopper"}))
        .await;
    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(server.store.count(CONTACT_SUBMISSIONS).await, 1);
}
