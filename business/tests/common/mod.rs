//! Shared helpers for integration tests against a mock admin API.
//!
//! ```ignore
//! let ctx = TestContext::new().await;
//! ctx.mock_users(json!([sample_user(1, false)])).await;
//! let table = ctx.users_table(true);
//! table.loader.load().await;
//! ```

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use lending_business::page::AdminTable;
use lending_business::{
    BookRequestRecord, BusinessConfig, Client, Confirm, LoadOrdering, Toaster, UserRecord,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Confirm prompt that answers with a fixed value and records what it was asked.
#[derive(Default)]
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(message.to_owned());
        self.answer
    }
}

/// A mock server plus a client pointed at it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub client: Client,
    pub toaster: Arc<Toaster>,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let client = Client::new(mock_server.uri()).expect("client");
        Self {
            mock_server,
            client,
            toaster: Toaster::new(Duration::from_secs(60)),
        }
    }

    pub fn config(&self) -> BusinessConfig {
        BusinessConfig::default().with_api_base_url(self.mock_server.uri())
    }

    pub fn users_table(&self, confirm: Arc<dyn Confirm>) -> AdminTable<UserRecord> {
        AdminTable::new(
            self.client.clone(),
            LoadOrdering::LastResolved,
            Arc::clone(&self.toaster),
            confirm,
        )
    }

    pub fn requests_table(&self, confirm: Arc<dyn Confirm>) -> AdminTable<BookRequestRecord> {
        AdminTable::new(
            self.client.clone(),
            LoadOrdering::LastResolved,
            Arc::clone(&self.toaster),
            confirm,
        )
    }

    pub async fn mock_get(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_users(&self, body: Value) {
        self.mock_get("/api/admin/users", body).await;
    }

    pub async fn mock_requests(&self, body: Value) {
        self.mock_get("/api/admin/book-requests", body).await;
    }

    pub async fn mock_patch(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("PATCH"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    /// Every request the server received for `route` with `verb`.
    pub async fn received(&self, verb: &str, route: &str) -> Vec<Request> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == verb && request.url.path() == route)
            .collect()
    }

    /// Number of PATCH requests seen by the server, on any path.
    pub async fn mutation_count(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == "PATCH")
            .count()
    }
}

pub fn sample_user(id: i64, is_blocked: bool) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@lib.test"),
        "username": format!("user{id}"),
        "role": "user",
        "is_blocked": is_blocked,
        "is_active": true,
    })
}

pub fn sample_request(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "book_id": id * 10,
        "requester_id": id + 100,
        "status": status,
    })
}

pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("json body")
}
