use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::JwtManager;
use crate::config::Settings;
use crate::database::MenuStore;
use crate::services::{
    ImageService, ListingService, PublishService, TranslationApi, TranslationService,
};
use crate::storage::ObjectStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub jwt: Arc<JwtManager>,
    pub store: Arc<dyn MenuStore>,
    pub publish_service: Arc<PublishService>,
    pub translation_service: Arc<TranslationService>,
    pub image_service: Arc<ImageService>,
    pub listing_service: Arc<ListingService>,
}

impl AppState {
    /// Wires every service onto the given store, storage and translation API.
    pub fn new(
        settings: Settings,
        store: Arc<dyn MenuStore>,
        storage: Arc<dyn ObjectStorage>,
        translation_api: Arc<dyn TranslationApi>,
    ) -> Self {
        let jwt = Arc::new(JwtManager::new(
            &settings.auth.jwt_secret,
            settings.auth.token_ttl_seconds,
        ));

        let publish_service = Arc::new(PublishService::new(
            store.clone(),
            storage.clone(),
            settings.languages.clone(),
            settings.publish.missing_references,
        ));

        let translation_service = Arc::new(TranslationService::new(
            store.clone(),
            translation_api,
            settings.languages.clone(),
        ));

        let image_service = Arc::new(ImageService::new(store.clone(), storage.clone()));

        let listing_service = Arc::new(ListingService::new(
            store.clone(),
            storage,
            settings.languages.default.clone(),
            settings.listing.fetch_concurrency,
        ));

        Self {
            settings: Arc::new(settings),
            jwt,
            store,
            publish_service,
            translation_service,
            image_service,
            listing_service,
        }
    }
}

impl FromRef<AppState> for Arc<PublishService> {
    fn from_ref(state: &AppState) -> Self {
        state.publish_service.clone()
    }
}

impl FromRef<AppState> for Arc<TranslationService> {
    fn from_ref(state: &AppState) -> Self {
        state.translation_service.clone()
    }
}

impl FromRef<AppState> for Arc<ImageService> {
    fn from_ref(state: &AppState) -> Self {
        state.image_service.clone()
    }
}

impl FromRef<AppState> for Arc<ListingService> {
    fn from_ref(state: &AppState) -> Self {
        state.listing_service.clone()
    }
}
