use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::services::{ImageService, ResizedImages};
use crate::utils::error::ApiError;
use crate::utils::response::Envelope;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeRequest {
    pub id: String,
    pub image_data: String,
    pub aspect_ratio: String,
}

/// Resize an item image. Failures come back as `success: false`.
pub async fn resize_handler(
    user: Result<AuthenticatedUser, ApiError>,
    State(images): State<Arc<ImageService>>,
    body: Result<Json<ResizeRequest>, JsonRejection>,
) -> Json<Envelope<ResizedImages>> {
    let user = match user {
        Ok(user) => user,
        Err(e) => {
            warn!("Rejected image resize request: {}", e);
            return Json(Envelope::failure("Authentication required"));
        }
    };
    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => {
            warn!("Malformed image resize request from {}: {}", user.editor_id, e.body_text());
            return Json(Envelope::failure(
                "Invalid request: expected {id, imageData, aspectRatio}",
            ));
        }
    };

    info!(
        "Resize image of item {} ({}) for {}",
        request.id, request.aspect_ratio, user.editor_id
    );

    match images
        .resize_item_image(&request.id, &request.image_data, &request.aspect_ratio)
        .await
    {
        Ok(urls) => Json(Envelope::success("Images resized and uploaded successfully", urls)),
        Err(e) => Json(Envelope::failure(format!(
            "Failed to resize image: {}",
            e.public_message()
        ))),
    }
}
