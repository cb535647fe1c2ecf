//! Shared fixtures for the API integration tests: a scripted MailChimp
//! double, an in-memory database, and a request helper that drives the
//! full router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use bridge_server::ServerState;
use bridge_server::db::repository::{list as list_repo, member as member_repo};
use bridge_server::mailchimp::MailChimpApi;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::{ListCreate, MemberCreate};
use shared::{AppError, AppResult, util};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tower::util::ServiceExt;

/// Scripted MailChimp double
///
/// Records every call and answers with a configurable resource id; each
/// verb can be flipped into failure mode.
#[derive(Default)]
pub struct MockMailChimp {
    /// id carried in post/patch responses
    remote_id: Mutex<Option<String>>,
    /// overrides the id in patch responses only (id reassignment)
    patch_response_id: Mutex<Option<String>>,
    pub fail_post: AtomicBool,
    pub fail_patch: AtomicBool,
    pub fail_delete: AtomicBool,
    /// (method, path) of every received call
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockMailChimp {
    pub fn set_next_id(&self, id: &str) {
        *self.remote_id.lock().unwrap() = Some(id.to_string());
    }

    pub fn set_patch_response_id(&self, id: &str) {
        *self.patch_response_id.lock().unwrap() = Some(id.to_string());
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with_method(&self, method: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, path)| path)
            .collect()
    }

    fn current_id(&self) -> String {
        self.remote_id
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "mc-remote-1".to_string())
    }

    fn record(&self, method: &str, path: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string()));
    }
}

#[async_trait]
impl MailChimpApi for MockMailChimp {
    async fn post(&self, path: &str, _body: &Value) -> AppResult<Value> {
        self.record("POST", path);
        if self.fail_post.load(Ordering::SeqCst) {
            return Err(AppError::upstream("MailChimp create failed"));
        }
        Ok(json!({
            "id": self.current_id(),
            "email_id": "em-1",
            "unique_email_id": "uq-1",
            "member_rating": 2
        }))
    }

    async fn get(&self, path: &str) -> AppResult<Value> {
        self.record("GET", path);
        Ok(json!({"health_status": "Everything's Chimpy!"}))
    }

    async fn patch(&self, path: &str, _body: &Value) -> AppResult<Value> {
        self.record("PATCH", path);
        if self.fail_patch.load(Ordering::SeqCst) {
            return Err(AppError::upstream("MailChimp update failed"));
        }
        let id = self
            .patch_response_id
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| self.current_id());
        Ok(json!({"id": id}))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.record("DELETE", path);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::upstream("MailChimp delete failed"));
        }
        Ok(())
    }
}

/// Fresh state over an in-memory database and a scripted remote
pub async fn test_state() -> (ServerState, Arc<MockMailChimp>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await
        .expect("enable foreign keys");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let remote = Arc::new(MockMailChimp::default());
    let state = ServerState::with_parts(pool, remote.clone());
    (state, remote)
}

/// Drive one request through the full router
pub async fn request(
    state: &ServerState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let app = bridge_server::api::router(state.clone());
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collected")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, json)
}

/// The list fixture the proxy's own docs use
pub fn list_data() -> Value {
    json!({
        "name": "New list",
        "permission_reminder": "You signed up for updates on Greeks economy.",
        "email_type_option": false,
        "contact": {
            "company": "Doe Ltd.",
            "address1": "DoeStreet 1",
            "address2": "",
            "city": "Doesy",
            "state": "Doedoe",
            "zip": "1672-12",
            "country": "US",
            "phone": "55533344412"
        },
        "campaign_defaults": {
            "from_name": "John Doe",
            "from_email": "john@doe.com",
            "subject": "My new campaign!",
            "language": "US"
        },
        "visibility": "prv",
        "use_archive_bar": false,
        "notify_on_subscribe": "notify@loyaltycorp.com.au",
        "notify_on_unsubscribe": "notify@loyaltycorp.com.au"
    })
}

pub fn member_data() -> Value {
    json!({
        "email_address": "RoyaltyCoLtd@hotmail.com",
        "status": "subscribed",
        "language": "US English",
        "vip": true,
        "location": {
            "latitude": "-37.898725",
            "longitude": "145.049333"
        },
        "ip_signup": "172.198.34.87",
        "tags": ["Soccer", "Fashion"]
    })
}

/// Create a synced list through the API, returning its local id
pub async fn create_list(state: &ServerState) -> i64 {
    let (status, body) = request(state, "POST", "/mailchimp/lists", Some(list_data())).await;
    assert_eq!(status, StatusCode::OK, "list create failed: {body}");
    body["list_id"].as_i64().expect("list_id")
}

/// Insert a list that was never synced (no MailChimp id), bypassing the API
pub async fn insert_unsynced_list(pool: &SqlitePool) -> i64 {
    let payload: ListCreate = serde_json::from_value(list_data()).unwrap();
    let list = payload.to_list(util::snowflake_id(), util::now_millis());
    list_repo::create(pool, &list).await.expect("insert list");
    list.list_id
}

/// Insert a member directly, optionally without a MailChimp id
pub async fn insert_member(pool: &SqlitePool, list_id: i64, mail_chimp_id: Option<&str>) -> i64 {
    let payload: MemberCreate = serde_json::from_value(member_data()).unwrap();
    let mut member = payload.to_member(util::snowflake_id(), list_id, util::now_millis());
    member.mail_chimp_id = mail_chimp_id.map(str::to_string);
    member_repo::create(pool, &member).await.expect("insert member");
    member.member_id
}
