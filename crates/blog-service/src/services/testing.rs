//! In-memory gateways and a recording notifier for service tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use blog_core::{
    AuthGateway, Credentials, DomainError, EntityId, GatewayResult, HealthProbe, MediaFile,
    MediaGateway, NewPost, Notifier, Post, PostGateway, PostUpdate, ReactionCall,
    ReactionGateway, ReactionKind, Registration, Session, UploadedMedia,
};
use blog_store::{MemoryStore, SessionStore};
use parking_lot::Mutex;

use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) const JANE_ID: EntityId = EntityId::new(7);
pub(crate) const PASSWORD: &str = "secret1";

pub(crate) fn jane() -> Session {
    Session::new("tok-1", JANE_ID, "jane")
}

pub(crate) type Notes = Arc<RecordingNotifier>;

/// Context wired to a fresh fake backend, an in-memory session store and a recording notifier
pub(crate) fn harness() -> (ServiceContext, Arc<FakeBackend>, Notes) {
    let backend = Arc::new(FakeBackend::default());
    let notes = Arc::new(RecordingNotifier::default());
    let sessions = SessionStore::new(Arc::new(MemoryStore::new()));

    let ctx = ServiceContextBuilder::new()
        .sessions(sessions)
        .health(backend.clone())
        .posts(backend.clone())
        .reactions(backend.clone())
        .auth(backend.clone())
        .media(backend.clone())
        .notifier(notes.clone())
        .build()
        .expect("all dependencies provided");

    (ctx, backend, notes)
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub(crate) fn successes(&self) -> Vec<String> {
        self.successes.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn notify_success(&self, message: &str) {
        self.successes.lock().push(message.to_string());
    }
}

/// Scriptable backend implementing every gateway
#[derive(Default)]
pub(crate) struct FakeBackend {
    health_calls: AtomicUsize,
    /// Health checks that fail before the first success; `usize::MAX` never succeeds
    failing_health_checks: AtomicUsize,
    reaction_failure: Mutex<Option<String>>,
    reaction_calls: Mutex<Vec<(EntityId, EntityId, ReactionCall)>>,
    posts: Mutex<Vec<Post>>,
    posts_failure: Mutex<Option<String>>,
    echo_writes: AtomicBool,
    viewers: Mutex<Vec<Option<EntityId>>>,
    registrations: Mutex<Vec<Registration>>,
    uploads: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn fail_health_checks(&self, count: usize) {
        self.failing_health_checks.store(count, Ordering::SeqCst);
    }

    pub(crate) fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_reactions(&self, message: &str) {
        *self.reaction_failure.lock() = Some(message.to_string());
    }

    pub(crate) fn succeed_reactions(&self) {
        *self.reaction_failure.lock() = None;
    }

    pub(crate) fn reaction_calls(&self) -> Vec<(EntityId, EntityId, ReactionCall)> {
        self.reaction_calls.lock().clone()
    }

    pub(crate) fn seed_posts(&self, posts: Vec<Post>) {
        *self.posts.lock() = posts;
    }

    pub(crate) fn stored_posts(&self) -> Vec<Post> {
        self.posts.lock().clone()
    }

    pub(crate) fn fail_posts(&self, message: &str) {
        *self.posts_failure.lock() = Some(message.to_string());
    }

    /// Make create/update return the stored post
    pub(crate) fn echo_writes(&self) {
        self.echo_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn viewers(&self) -> Vec<Option<EntityId>> {
        self.viewers.lock().clone()
    }

    pub(crate) fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().clone()
    }

    pub(crate) fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    fn posts_result(&self) -> GatewayResult<()> {
        match self.posts_failure.lock().clone() {
            Some(message) => Err(DomainError::Remote(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HealthProbe for FakeBackend {
    async fn health_check(&self) -> GatewayResult<()> {
        let call = self.health_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call > self.failing_health_checks.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::ServiceUnavailable(
                "Backend service is not available".to_string(),
            ))
        }
    }
}

#[async_trait]
impl ReactionGateway for FakeBackend {
    async fn react_to_post(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> GatewayResult<()> {
        self.reaction_calls
            .lock()
            .push((post_id, user_id, ReactionCall::React(kind)));
        match self.reaction_failure.lock().clone() {
            Some(message) => Err(DomainError::Remote(message)),
            None => Ok(()),
        }
    }

    async fn remove_reaction(&self, post_id: EntityId, user_id: EntityId) -> GatewayResult<()> {
        self.reaction_calls
            .lock()
            .push((post_id, user_id, ReactionCall::Remove));
        match self.reaction_failure.lock().clone() {
            Some(message) => Err(DomainError::Remote(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostGateway for FakeBackend {
    async fn list_posts(&self) -> GatewayResult<Vec<Post>> {
        self.posts_result()?;
        Ok(self.stored_posts())
    }

    async fn get_post(&self, post_id: EntityId, viewer: Option<EntityId>) -> GatewayResult<Post> {
        self.posts_result()?;
        self.viewers.lock().push(viewer);
        self.posts
            .lock()
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
            .ok_or(DomainError::PostNotFound(post_id))
    }

    async fn create_post(&self, post: &NewPost) -> GatewayResult<Option<Post>> {
        self.posts_result()?;
        let mut posts = self.posts.lock();
        let id = EntityId::new(100 + posts.len() as i64);
        let mut created = Post::new(id, post.title.clone(), post.content.clone())
            .with_author(JANE_ID, "jane");
        created.media_type = post.media_type;
        created.media_urls = post.media_urls.clone().unwrap_or_default();
        posts.push(created.clone());
        Ok(self.echo_writes.load(Ordering::SeqCst).then_some(created))
    }

    async fn update_post(&self, update: &PostUpdate) -> GatewayResult<Option<Post>> {
        self.posts_result()?;
        let mut posts = self.posts.lock();
        let post = posts
            .iter_mut()
            .find(|post| post.id == update.post_id)
            .ok_or(DomainError::PostNotFound(update.post_id))?;
        post.title = update.title.clone();
        post.content = update.content.clone();
        post.media_type = update.media_type;
        post.media_urls = update.media_urls.clone().unwrap_or_default();
        Ok(self.echo_writes.load(Ordering::SeqCst).then(|| post.clone()))
    }

    async fn delete_post(&self, post_id: EntityId) -> GatewayResult<()> {
        self.posts_result()?;
        self.posts.lock().retain(|post| post.id != post_id);
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for FakeBackend {
    async fn register(&self, registration: &Registration) -> GatewayResult<()> {
        if registration.username == "taken" {
            return Err(DomainError::Remote("Username already exists".to_string()));
        }
        self.registrations.lock().push(registration.clone());
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<Session> {
        if credentials.password == PASSWORD {
            Ok(Session::new("tok-1", JANE_ID, credentials.username.clone()))
        } else {
            Err(DomainError::Remote("Invalid credentials".to_string()))
        }
    }
}

#[async_trait]
impl MediaGateway for FakeBackend {
    async fn upload(&self, files: &[MediaFile]) -> GatewayResult<UploadedMedia> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        let media_urls: Vec<String> = files
            .iter()
            .map(|file| format!("/uploads/{}", file.file_name))
            .collect();
        let display_urls = media_urls
            .iter()
            .map(|url| format!("http://localhost:8080{url}"))
            .collect();
        Ok(UploadedMedia {
            media_urls,
            display_urls,
        })
    }
}
