//! Test helpers for integration tests
//!
//! Provides a mocked backend, configuration pointing at it and a service
//! context backed by the real HTTP client and a session file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use blog_api::ApiClient;
use blog_common::AppConfig;
use blog_service::{AppStore, ChannelNotifier, Notification, NotificationLevel, ServiceContext};
use blog_store::{FileStore, SessionStore};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::fixtures::{login_response, posts_envelope, PostFixture};

/// Mocked blog backend plus a private session directory
pub struct TestBackend {
    pub server: MockServer,
    session_dir: TempDir,
}

impl TestBackend {
    /// Start a new mock backend
    pub async fn start() -> Result<Self> {
        Ok(Self {
            server: MockServer::start().await,
            session_dir: tempfile::tempdir()?,
        })
    }

    /// Base URL of the API, including the `/api` segment
    pub fn api_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn session_file(&self) -> PathBuf {
        self.session_dir.path().join("session.json")
    }

    /// Configuration with short readiness timings
    pub fn config(&self) -> Result<AppConfig> {
        let vars: HashMap<&str, String> = HashMap::from([
            ("BLOG_API_BASE_URL", self.api_url()),
            ("BLOG_REQUEST_TIMEOUT_SECS", "5".to_string()),
            ("BLOG_HEALTH_INTERVAL_SECS", "1".to_string()),
            ("BLOG_COUNTDOWN_SECS", "3".to_string()),
            ("BLOG_READY_DELAY_MS", "0".to_string()),
            ("BLOG_SESSION_FILE", self.session_file().display().to_string()),
        ]);
        Ok(AppConfig::from_lookup(|key| vars.get(key).cloned())?)
    }

    /// Fresh client state over the shared session file
    pub fn client(&self) -> Result<TestClient> {
        let config = self.config()?;
        let sessions = SessionStore::new(Arc::new(FileStore::from_config(&config.storage)));
        let client = ApiClient::new(config.api, sessions)?;
        let (notifier, notifications) = ChannelNotifier::new();

        Ok(TestClient {
            ctx: ServiceContext::from_client(client, AppStore::default(), Arc::new(notifier)),
            notifications,
        })
    }

    pub async fn mount_health(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Health endpoint failing `failures` times before answering 200
    pub async fn mount_health_after(&self, failures: u64) {
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(failures)
            .with_priority(1)
            .mount(&self.server)
            .await;
        self.mount_health(200).await;
    }

    pub async fn mount_login(&self, token: &str, id: i64, username: &str) {
        Mock::given(method("POST"))
            .and(path("/api/users/loginUser"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_response(token, id, username)))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_posts(&self, posts: &[PostFixture]) {
        Mock::given(method("GET"))
            .and(path("/api/posts/allPost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_envelope(posts)))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_get_post(&self, post: &PostFixture) {
        Mock::given(method("POST"))
            .and(path("/api/posts/getPost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post.to_json()))
            .mount(&self.server)
            .await;
    }

    /// Requests received on `route`
    pub async fn requests_to(&self, route: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == route)
            .collect()
    }
}

/// Service context and its notification stream
pub struct TestClient {
    pub ctx: ServiceContext,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

impl TestClient {
    /// Notifications raised so far
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }

    /// Messages of error notifications raised so far
    pub fn error_messages(&mut self) -> Vec<String> {
        self.drain_notifications()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.message)
            .collect()
    }
}

/// JSON body of a captured request
pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap_or(Value::Null)
}
