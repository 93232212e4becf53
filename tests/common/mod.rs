//! Shared fixtures for integration tests: an in-memory repository and a
//! router wired onto it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use users_api::api::{create_router, AppState};
use users_api::config::API_MEDIA_TYPE;
use users_api::domain::User;
use users_api::errors::AppResult;
use users_api::infra::UserRepository;
use users_api::services::UserManager;
use users_api::types::{Page, PaginationParams};

/// `UserRepository` over a vector, ordered like the SQL store.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn taken(&self, except: Uuid, matches: impl Fn(&User) -> bool) -> bool {
        self.users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id != except && matches(u))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn username_taken(&self, username: &str, except: Uuid) -> AppResult<bool> {
        Ok(self.taken(except, |u| u.profile.username == username))
    }

    async fn email_taken(&self, email: &str, except: Uuid) -> AppResult<bool> {
        Ok(self.taken(except, |u| u.profile.email == email))
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<Page<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect();
        Ok(Page::new(items, total))
    }
}

/// Router over a fresh in-memory store.
pub fn test_app() -> (Router, Arc<InMemoryUsers>) {
    let users = InMemoryUsers::new();
    let service = UserManager::new(users.clone());
    let app = create_router(AppState::new(Arc::new(service)));
    (app, users)
}

/// Request carrying the headers the API requires.
pub fn api_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, API_MEDIA_TYPE)
        .body(body)
        .unwrap()
}

/// Send a request and decode the JSON response body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

/// Valid signup attributes for `username`.
pub fn signup(username: &str) -> Value {
    serde_json::json!({
        "user": {
            "name": "Test User",
            "username": username,
            "email": format!("{}@sample.com", username),
            "mobile": "9876543210",
            "password": "test123#",
            "password_confirmation": "test123#"
        }
    })
}

/// Create a user through the API and return its ID.
pub async fn create_user(app: &Router, username: &str) -> String {
    let (status, body) = send(app, api_request(Method::POST, "/api/users", Some(signup(username)))).await;
    assert_eq!(status, StatusCode::OK, "signup failed: {}", body);
    body["data"]["user"]["id"].as_str().unwrap().to_string()
}
