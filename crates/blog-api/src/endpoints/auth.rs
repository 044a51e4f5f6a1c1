//! /users endpoints

use async_trait::async_trait;
use blog_common::{AppError, AppResult};
use blog_core::{AuthGateway, Credentials, GatewayResult, Registration, Session};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, RequestOptions};
use crate::dto::{LoginRequest, LoginResponse, RegisterRequest};

pub(crate) fn to_body(body: impl Serialize) -> AppResult<Value> {
    serde_json::to_value(body).map_err(AppError::internal)
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn register(&self, registration: &Registration) -> GatewayResult<()> {
        let body = to_body(RegisterRequest {
            username: &registration.username,
            email: &registration.email,
            password: &registration.password,
        })?;

        self.request_unit(
            Method::POST,
            "/users/registerUser",
            Some(body),
            RequestOptions::new("Registration failed"),
        )
        .await?;

        tracing::info!(username = %registration.username, "Registered account");
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<Session> {
        let body = to_body(LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        })?;

        let response: LoginResponse = self
            .request(
                Method::POST,
                "/users/loginUser",
                Some(body),
                RequestOptions::new("Login failed"),
            )
            .await?;

        Ok(response.into_session(&credentials.username))
    }
}
