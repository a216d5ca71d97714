use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use menu_core::PublishedMenuSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::services::{ListingService, PublishService};
use crate::utils::error::ApiError;
use crate::utils::response::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishAction {
    Publish,
    Unpublish,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub menu_id: String,
    pub action: PublishAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishData {
    pub url: String,
    pub languages: Vec<String>,
}

/// Publish or unpublish a menu. Failures come back as `success: false`.
pub async fn publish_handler(
    user: Result<AuthenticatedUser, ApiError>,
    State(publisher): State<Arc<PublishService>>,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> Json<Envelope<PublishData>> {
    let user = match user {
        Ok(user) => user,
        Err(e) => {
            warn!("Rejected publish request: {}", e);
            return Json(Envelope::failure("Authentication required"));
        }
    };
    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => {
            warn!("Malformed publish request from {}: {}", user.editor_id, e.body_text());
            return Json(Envelope::failure(
                "Invalid request: expected {menuId, action: \"publish\" | \"unpublish\"}",
            ));
        }
    };

    info!(
        "{:?} menu {} requested by {}",
        request.action, request.menu_id, user.editor_id
    );

    match request.action {
        PublishAction::Publish => match publisher.publish(&request.menu_id).await {
            Ok(outcome) => Json(Envelope::success(
                "Menu published successfully",
                PublishData {
                    url: outcome.url,
                    languages: outcome.languages,
                },
            )),
            Err(e) => {
                warn!("Publish of menu {} failed: {}", request.menu_id, e);
                Json(Envelope::failure(format!(
                    "Failed to publish menu: {}",
                    e.public_message()
                )))
            }
        },
        PublishAction::Unpublish => match publisher.unpublish(&request.menu_id).await {
            Ok(_) => Json(Envelope::ok("Menu unpublished successfully")),
            Err(e) => {
                warn!("Unpublish of menu {} failed: {}", request.menu_id, e);
                Json(Envelope::failure(format!(
                    "Failed to unpublish menu: {}",
                    e.public_message()
                )))
            }
        },
    }
}

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub lang: Option<String>,
}

pub async fn list_menus_handler(
    State(listing): State<Arc<ListingService>>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<PublishedMenuSummary>>, ApiError> {
    let lang = query
        .lang
        .as_deref()
        .map(menu_core::language::normalize_language)
        .unwrap_or_else(|| listing.default_language().to_string());

    let menus = listing.list(&lang).await?;
    Ok(Json(menus))
}
