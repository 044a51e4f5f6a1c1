//! End-to-end client flows against a mocked backend
//!
//! Run with: cargo test -p integration-tests --test client_flow

use blog_core::{EntityId, ReactionKind};
use blog_service::{
    AuthService, GateOutcome, LoginForm, PostService, ReactionOutcome, ReactionService,
    ReadinessGate,
};
use integration_tests::{
    error_body, json_body, PostFixture, TestBackend, JANE_ID, JANE_PASSWORD, JANE_TOKEN,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn logged_in(backend: &TestBackend) -> integration_tests::TestClient {
    backend.mount_login(JANE_TOKEN, JANE_ID, "jane").await;
    let client = backend.client().unwrap();
    AuthService::new(&client.ctx)
        .login(LoginForm::new("jane", JANE_PASSWORD))
        .await
        .unwrap();
    client
}

// ============================================================================
// Readiness
// ============================================================================

#[tokio::test]
async fn test_gate_retries_until_backend_answers() {
    let backend = TestBackend::start().await.unwrap();
    backend.mount_health_after(2).await;
    let client = backend.client().unwrap();
    let config = backend.config().unwrap();

    let outcome = ReadinessGate::new(client.ctx.clone(), &config.readiness)
        .spawn()
        .wait()
        .await;

    assert_eq!(outcome, GateOutcome::Ready { session: None });
    assert_eq!(backend.requests_to("/api/health").await.len(), 3);
    let readiness = client.ctx.store().select(|s| s.readiness);
    assert!(readiness.is_connected());
    assert_eq!(readiness.attempts, 3);
}

#[tokio::test]
async fn test_gate_restores_session_saved_by_previous_run() {
    let backend = TestBackend::start().await.unwrap();
    backend.mount_health(200).await;
    let first_run = logged_in(&backend).await;
    drop(first_run);

    let client = backend.client().unwrap();
    let config = backend.config().unwrap();
    let outcome = ReadinessGate::new(client.ctx.clone(), &config.readiness)
        .spawn()
        .wait()
        .await;

    let GateOutcome::Ready { session: Some(session) } = outcome else {
        panic!("expected a restored session, got {outcome:?}");
    };
    assert_eq!(session.id, EntityId::new(JANE_ID));
    assert_eq!(session.token, JANE_TOKEN);
    assert!(client.ctx.store().select(|s| s.auth.is_authenticated));
}

#[tokio::test]
async fn test_gate_cancel_stops_polling() {
    let backend = TestBackend::start().await.unwrap();
    backend.mount_health(503).await;
    let client = backend.client().unwrap();
    let config = backend.config().unwrap();

    let handle = ReadinessGate::new(client.ctx.clone(), &config.readiness).spawn();
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    handle.cancel();
    assert_eq!(handle.wait().await, GateOutcome::Cancelled);

    let polled = backend.requests_to("/api/health").await.len();
    assert!(polled >= 1);
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    assert_eq!(backend.requests_to("/api/health").await.len(), polled);
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_list_posts_from_envelope() {
    let backend = TestBackend::start().await.unwrap();
    let posts = [PostFixture::by_john(1).reactions(5, 2), PostFixture::by_john(2)];
    backend.mount_posts(&posts).await;
    let client = backend.client().unwrap();

    let listed = PostService::new(&client.ctx).refresh_posts().await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].reactions.likes, 5);
    assert_eq!(listed[0].author_id, Some(EntityId::new(99)));
    assert!(listed[1].media_urls.is_empty());
}

#[tokio::test]
async fn test_open_post_sends_viewer_and_token() {
    let backend = TestBackend::start().await.unwrap();
    let client = logged_in(&backend).await;
    let post = PostFixture::by_john(3).reactions(1, 0).liked();
    backend.mount_get_post(&post).await;

    let opened = PostService::new(&client.ctx)
        .open_post(EntityId::new(3))
        .await
        .unwrap();

    assert!(opened.reactions.is_liked());
    let requests = backend.requests_to("/api/posts/getPost").await;
    assert_eq!(json_body(&requests[0]), json!({ "postId": 3, "userId": JANE_ID }));
    assert_eq!(
        requests[0].headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer tok-jane")
    );
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_switch_dislike_to_like() {
    let backend = TestBackend::start().await.unwrap();
    let mut client = logged_in(&backend).await;
    let post = PostFixture::by_john(4).reactions(2, 3).disliked();
    backend.mount_posts(&[post]).await;
    Mock::given(method("POST"))
        .and(path("/api/postReactions/reactPost"))
        .and(header("authorization", "Bearer tok-jane"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    PostService::new(&client.ctx).refresh_posts().await.unwrap();
    let outcome = ReactionService::new(&client.ctx)
        .apply_reaction(EntityId::new(4), ReactionKind::Like)
        .await;

    assert_eq!(outcome, ReactionOutcome::Confirmed);
    let reactions = client
        .ctx
        .store()
        .select(|s| s.posts.find(EntityId::new(4)).map(|p| p.reactions))
        .unwrap();
    assert_eq!((reactions.likes, reactions.dislikes), (3, 2));
    assert!(reactions.is_liked() && !reactions.is_disliked());

    let requests = backend.requests_to("/api/postReactions/reactPost").await;
    assert_eq!(
        json_body(&requests[0]),
        json!({ "postId": 4, "userId": JANE_ID, "reactionType": "LIKE" })
    );
    assert!(client.error_messages().is_empty());
}

#[tokio::test]
async fn test_failed_reaction_rolls_back_and_notifies() {
    let backend = TestBackend::start().await.unwrap();
    let mut client = logged_in(&backend).await;
    let post = PostFixture::by_john(5).reactions(2, 3).disliked();
    backend.mount_posts(&[post]).await;
    Mock::given(method("POST"))
        .and(path("/api/postReactions/reactPost"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body("Reaction service down")))
        .mount(&backend.server)
        .await;

    PostService::new(&client.ctx).refresh_posts().await.unwrap();
    let before = client.ctx.store().select(|s| s.posts.clone());
    client.drain_notifications();

    let outcome = ReactionService::new(&client.ctx)
        .apply_reaction(EntityId::new(5), ReactionKind::Like)
        .await;

    assert_eq!(outcome, ReactionOutcome::RolledBack);
    assert_eq!(client.ctx.store().select(|s| s.posts.clone()), before);
    assert_eq!(client.error_messages(), vec!["Reaction service down".to_string()]);
}

#[tokio::test]
async fn test_removing_reaction_uses_delete_endpoint() {
    let backend = TestBackend::start().await.unwrap();
    let mut client = logged_in(&backend).await;
    let post = PostFixture::by_john(6).reactions(6, 2).liked();
    backend.mount_posts(&[post]).await;
    Mock::given(method("DELETE"))
        .and(path("/api/postReactions/removeReactPost"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend.server)
        .await;

    PostService::new(&client.ctx).refresh_posts().await.unwrap();
    let outcome = ReactionService::new(&client.ctx)
        .apply_reaction(EntityId::new(6), ReactionKind::Like)
        .await;

    assert_eq!(outcome, ReactionOutcome::RolledBack);
    let reactions = client
        .ctx
        .store()
        .select(|s| s.posts.find(EntityId::new(6)).map(|p| p.reactions))
        .unwrap();
    assert_eq!(reactions.likes, 6);
    assert!(reactions.is_liked());
    assert_eq!(client.error_messages(), vec!["Failed to remove reaction".to_string()]);
}

#[tokio::test]
async fn test_reaction_requires_login() {
    let backend = TestBackend::start().await.unwrap();
    backend.mount_posts(&[PostFixture::by_john(7)]).await;
    let client = backend.client().unwrap();

    PostService::new(&client.ctx).refresh_posts().await.unwrap();
    let outcome = ReactionService::new(&client.ctx)
        .apply_reaction(EntityId::new(7), ReactionKind::Dislike)
        .await;

    assert_eq!(outcome, ReactionOutcome::LoginRequired);
    assert!(backend.requests_to("/api/postReactions/reactPost").await.is_empty());
}
