//! Authentication service
//!
//! Handles registration, login, logout and restoring the persisted session.

use blog_core::{Action, Session};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginForm, RegistrationForm};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an account; does not log in
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: RegistrationForm) -> ServiceResult<()> {
        form.validate()?;

        if let Err(e) = self.ctx.auth().register(&form.to_registration()).await {
            warn!(error = %e, "Registration failed");
            self.ctx.notifier().notify_error(&e.to_string());
            return Err(e.into());
        }

        info!("User registered");
        self.ctx.notifier().notify_success("Registration successful");
        Ok(())
    }

    /// Log in, persist the session and mark the user authenticated
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn login(&self, form: LoginForm) -> ServiceResult<Session> {
        form.validate()?;

        self.ctx.store().dispatch(Action::AuthStart);

        match self.authenticate(&form).await {
            Ok(session) => {
                info!(user_id = %session.id, "User logged in");
                self.ctx
                    .store()
                    .dispatch(Action::LoginSuccess(Some(session.clone())));
                self.ctx.notifier().notify_success("Login successful");
                Ok(session)
            }
            Err(e) => {
                let message = e.user_message();
                warn!(error = %e, "Login failed");
                self.ctx.store().dispatch(Action::AuthFailure(message.clone()));
                self.ctx.notifier().notify_error(&message);
                Err(e)
            }
        }
    }

    async fn authenticate(&self, form: &LoginForm) -> ServiceResult<Session> {
        let session = self.ctx.auth().login(&form.to_credentials()).await?;
        self.ctx
            .sessions()
            .save(&session)
            .await
            .map_err(|e| ServiceError::internal(format!("failed to persist session: {e}")))?;
        Ok(session)
    }

    /// Forget the session locally
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.ctx.sessions().clear().await {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.ctx.store().dispatch(Action::Logout);
        info!("User logged out");
    }

    /// Initialize auth state from the persisted session record
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Option<Session> {
        let session = self.ctx.sessions().load().await;
        match &session {
            Some(session) => {
                info!(user_id = %session.id, "Session restored");
                self.ctx
                    .store()
                    .dispatch(Action::LoginSuccess(Some(session.clone())));
            }
            None => self.ctx.store().dispatch(Action::Logout),
        }
        session
    }

    /// Currently logged-in user
    pub fn current_user(&self) -> Option<Session> {
        self.ctx.store().select(|state| {
            state
                .auth
                .user
                .clone()
                .filter(|_| state.auth.is_authenticated)
        })
    }
}
