use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::build_router;
use crate::config::*;
use crate::database::{InMemoryMenuStore, MenuRecord, MenuStore};
use crate::services::translation_client::MockTranslationApi;
use crate::state::AppState;
use crate::storage::InMemoryObjectStorage;

const SECRET: &str = "router-test-secret";

fn settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            backend: DatabaseBackend::Memory,
            url: String::new(),
            pool_max_size: 1,
            pool_timeout_seconds: 1,
        },
        storage: StorageConfig {
            root: std::env::temp_dir().to_string_lossy().into_owned(),
            public_base_url: "memory://public".into(),
        },
        translation: TranslationConfig {
            base_url: "http://unused".into(),
            api_key: String::new(),
            timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: SECRET.into(),
            token_ttl_seconds: 600,
        },
        languages: LanguagesConfig {
            default: "en".into(),
            supported: vec!["en".into(), "es".into()],
        },
        publish: PublishConfig::default(),
        listing: ListingConfig::default(),
    }
}

struct Harness {
    app: Router,
    token: String,
    store: Arc<InMemoryMenuStore>,
    storage: Arc<InMemoryObjectStorage>,
}

async fn harness(api: MockTranslationApi) -> Harness {
    let store = Arc::new(InMemoryMenuStore::new());
    store
        .save_menu(&MenuRecord {
            id: "m1".into(),
            name: "Dinner".into(),
            description: "Evening".into(),
            menu_type: "restaurant".into(),
            category_ids: Vec::new(),
            last_updated: None,
            published_url: None,
        })
        .await
        .unwrap();
    let storage = Arc::new(InMemoryObjectStorage::new());

    let state = AppState::new(settings(), store.clone(), storage.clone(), Arc::new(api));
    let token = state.jwt.generate_token("editor-1", None).unwrap();

    Harness {
        app: build_router(state),
        token,
        store,
        storage,
    }
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let h = harness(MockTranslationApi::new()).await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_publish_requires_auth_but_answers_with_envelope() {
    let h = harness(MockTranslationApi::new()).await;
    let (status, body) = send(
        &h.app,
        post("/api/menus/publish", None, json!({"menuId": "m1", "action": "publish"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_publish_list_unpublish() {
    let h = harness(MockTranslationApi::new()).await;

    let (status, body) = send(
        &h.app,
        post(
            "/api/menus/publish",
            Some(&h.token),
            json!({"menuId": "m1", "action": "publish"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["url"], "memory://public/menus/menu-m1.json");
    assert_eq!(body["languages"], json!(["en"]));

    let request = Request::builder()
        .uri("/api/menus?lang=es")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "m1");
    assert_eq!(body[0]["name"], "Dinner");

    let (_, body) = send(
        &h.app,
        post(
            "/api/menus/publish",
            Some(&h.token),
            json!({"menuId": "m1", "action": "unpublish"}),
        ),
    )
    .await;
    assert_eq!(body["success"], true);
    assert!(h.storage.is_empty());
    assert_eq!(h.store.get_menu("m1").await.unwrap().unwrap().published_url, None);
}

#[tokio::test]
async fn test_publish_unknown_menu_reports_failure() {
    let h = harness(MockTranslationApi::new()).await;
    let (status, body) = send(
        &h.app,
        post(
            "/api/menus/publish",
            Some(&h.token),
            json!({"menuId": "missing", "action": "publish"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_translate_typed_errors() {
    let h = harness(MockTranslationApi::new()).await;

    let (status, _) = send(
        &h.app,
        post("/api/translate/menu", None, json!({"menuId": "m1", "targetLanguage": "es"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &h.app,
        post(
            "/api/translate/menu",
            Some(&h.token),
            json!({"menuId": "m1", "targetLanguage": "en"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, _) = send(
        &h.app,
        post(
            "/api/translate/item",
            Some(&h.token),
            json!({"itemId": "nope", "targetLanguage": "es"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_translate_menu() {
    let mut api = MockTranslationApi::new();
    api.expect_translate()
        .times(1)
        .returning(|_, _, _| Ok(vec!["Cena".into(), "Noche".into()]));
    let h = harness(api).await;

    let (status, body) = send(
        &h.app,
        post(
            "/api/translate/menu",
            Some(&h.token),
            json!({"menuId": "m1", "targetLanguage": "es"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "es");
    assert_eq!(body["name"], "Cena");
    assert_eq!(body["description"], "Noche");
}

#[tokio::test]
async fn test_translate_upstream_failure_is_bad_gateway() {
    let mut api = MockTranslationApi::new();
    api.expect_translate()
        .returning(|_, _, _| Err(crate::utils::error::ServiceError::Translation("key=secret".into())));
    let h = harness(api).await;

    let (status, body) = send(
        &h.app,
        post(
            "/api/translate/menu",
            Some(&h.token),
            json!({"menuId": "m1", "targetLanguage": "es"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body["message"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_resize_failure_envelope() {
    let h = harness(MockTranslationApi::new()).await;
    let (status, body) = send(
        &h.app,
        post(
            "/api/images/resize",
            Some(&h.token),
            json!({"id": "i1", "imageData": "AAAA", "aspectRatio": "3:2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body.get("smallUrl").is_none());
}

#[tokio::test]
async fn test_ready_when_store_answers() {
    let h = harness(MockTranslationApi::new()).await;
    let request = Request::builder().uri("/health/ready").body(Body::empty()).unwrap();
    let (status, _) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_publish_body_gets_envelope() {
    let h = harness(MockTranslationApi::new()).await;

    for body in [
        json!({"menuId": "m1", "action": "archive"}),
        json!({"action": "publish"}),
    ] {
        let (status, body) = send(&h.app, post("/api/menus/publish", Some(&h.token), body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request"));
    }
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_malformed_resize_body_gets_envelope() {
    let h = harness(MockTranslationApi::new()).await;
    let (status, body) = send(
        &h.app,
        post("/api/images/resize", Some(&h.token), json!({"id": "i1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request"));
}
