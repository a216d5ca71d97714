use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::database::TranslationRecord;
use crate::services::TranslationService;
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateItemRequest {
    pub item_id: String,
    pub target_language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateCategoryRequest {
    pub category_id: String,
    pub target_language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateMenuRequest {
    pub menu_id: String,
    pub target_language: String,
}

pub async fn translate_item_handler(
    user: AuthenticatedUser,
    State(translator): State<Arc<TranslationService>>,
    Json(request): Json<TranslateItemRequest>,
) -> Result<Json<TranslationRecord>, ApiError> {
    info!(
        "Translate item {} into {} for {}",
        request.item_id, request.target_language, user.editor_id
    );
    let record = translator
        .translate_item(&request.item_id, &request.target_language)
        .await?;
    Ok(Json(record))
}

pub async fn translate_category_handler(
    user: AuthenticatedUser,
    State(translator): State<Arc<TranslationService>>,
    Json(request): Json<TranslateCategoryRequest>,
) -> Result<Json<TranslationRecord>, ApiError> {
    info!(
        "Translate category {} into {} for {}",
        request.category_id, request.target_language, user.editor_id
    );
    let record = translator
        .translate_category(&request.category_id, &request.target_language)
        .await?;
    Ok(Json(record))
}

pub async fn translate_menu_handler(
    user: AuthenticatedUser,
    State(translator): State<Arc<TranslationService>>,
    Json(request): Json<TranslateMenuRequest>,
) -> Result<Json<TranslationRecord>, ApiError> {
    info!(
        "Translate menu {} into {} for {}",
        request.menu_id, request.target_language, user.editor_id
    );
    let record = translator
        .translate_menu(&request.menu_id, &request.target_language)
        .await?;
    Ok(Json(record))
}
