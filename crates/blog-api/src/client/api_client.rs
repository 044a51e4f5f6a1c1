//! HTTP client for the blog backend
//!
//! Every call goes through [`ApiClient::send`], which adds the bearer token,
//! optionally attaches the current user to the body and turns failures into
//! an [`AppError`] with a readable message.

use std::sync::Arc;

use blog_common::{ApiConfig, ApiErrorBody, AppError, AppResult};
use blog_core::Session;
use blog_store::SessionStore;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Per-call request settings
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    /// Send the bearer token; fails early when there is none
    pub auth: bool,
    /// Add `user: { id }` to a JSON object body that has no `user` yet
    pub attach_user: bool,
    /// Message used when neither the backend nor the transport gives one
    pub fallback: &'static str,
}

impl RequestOptions {
    #[must_use]
    pub const fn new(fallback: &'static str) -> Self {
        Self {
            auth: false,
            attach_user: false,
            fallback,
        }
    }

    #[must_use]
    pub const fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }

    /// Implies `authenticated`
    #[must_use]
    pub const fn attach_user(mut self) -> Self {
        self.auth = true;
        self.attach_user = true;
        self
    }
}

/// Blog backend client
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    http: reqwest::Client,
    sessions: SessionStore,
}

impl ApiClient {
    /// Create a client; the session store supplies the bearer token
    pub fn new(config: ApiConfig, sessions: SessionStore) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        tracing::debug!(base_url = %config.base_url, "API client created");

        Ok(Self {
            config: Arc::new(config),
            http,
            sessions,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Send a JSON request and decode the response body
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> AppResult<T> {
        let raw = self.send(method, path, body, options).await?;
        decode(&raw)
    }

    /// Send a JSON request whose response body does not matter
    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> AppResult<()> {
        self.send(method, path, body, options).await.map(|_| ())
    }

    /// Send a JSON request and return the raw response body
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        mut body: Option<Value>,
        options: RequestOptions,
    ) -> AppResult<String> {
        let url = self.config.endpoint(path);
        let session = self.session_for(options)?;

        if let (Some(session), true) = (&session, options.attach_user) {
            attach_user(body.as_mut(), session);
        }

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(session) = &session {
            builder = builder.bearer_auth(&session.token);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        self.dispatch(&method, &url, builder, options.fallback).await
    }

    /// Send a prepared request; `prepare` receives the authorized builder
    pub(crate) async fn send_with(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> AppResult<String> {
        let url = self.config.endpoint(path);
        let session = self.session_for(options)?;

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(session) = &session {
            builder = builder.bearer_auth(&session.token);
        }

        self.dispatch(&method, &url, prepare(builder), options.fallback)
            .await
    }

    fn session_for(&self, options: RequestOptions) -> AppResult<Option<Session>> {
        if !options.auth {
            return Ok(None);
        }

        self.sessions
            .current()
            .filter(|session| !session.token.is_empty())
            .map(Some)
            .ok_or(AppError::NotAuthenticated)
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        builder: RequestBuilder,
        fallback: &str,
    ) -> AppResult<String> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let transport = e.to_string();
                tracing::debug!(url = %url, method = %method, error = %transport, "API transport error");
                return Err(AppError::Network(
                    ApiErrorBody::default().normalize(Some(&transport), fallback),
                ));
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::Network(ApiErrorBody::default().normalize(Some(&e.to_string()), fallback))
        })?;

        if status.is_success() {
            return Ok(text);
        }

        tracing::debug!(
            url = %url,
            method = %method,
            status = status.as_u16(),
            body = %text,
            "API error response"
        );

        Err(AppError::Api {
            status: status.as_u16(),
            message: ApiErrorBody::parse(&text).normalize(None, fallback),
        })
    }
}

fn attach_user(body: Option<&mut Value>, session: &Session) {
    if let Some(Value::Object(map)) = body {
        if !map.contains_key("user") && !session.id.is_zero() {
            map.insert("user".to_string(), json!({ "id": session.id }));
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> AppResult<T> {
    let raw = if raw.trim().is_empty() { "null" } else { raw };
    serde_json::from_str(raw).map_err(|e| AppError::Decode(e.to_string()))
}
