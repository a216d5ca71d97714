//! Item image resizing: one upload becomes a small and a large JPEG.

use std::io::Cursor;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use menu_core::{ItemImages, MenuError};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::database::{ItemRecord, MenuStore};
use crate::storage::ObjectStorage;
use crate::utils::error::ServiceError;

const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Wide,
}

impl AspectRatio {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1:1" => Some(AspectRatio::Square),
            "16:9" => Some(AspectRatio::Wide),
            _ => None,
        }
    }

    /// (small, large) target dimensions
    pub fn sizes(self) -> [(u32, u32); 2] {
        match self {
            AspectRatio::Square => [(300, 300), (800, 800)],
            AspectRatio::Wide => [(480, 270), (1280, 720)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizedImages {
    pub small_url: String,
    pub large_url: String,
}

pub struct ImageService {
    store: Arc<dyn MenuStore>,
    storage: Arc<dyn ObjectStorage>,
}

impl ImageService {
    pub fn new(store: Arc<dyn MenuStore>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { store, storage }
    }

    pub async fn resize_item_image(
        &self,
        item_id: &str,
        image_data: &str,
        aspect_ratio: &str,
    ) -> Result<ResizedImages, ServiceError> {
        if item_id.trim().is_empty() {
            return Err(ServiceError::Validation("Item id is required".to_string()));
        }
        let aspect = AspectRatio::parse(aspect_ratio).ok_or_else(|| {
            ServiceError::Validation(format!("Unsupported aspect ratio: '{}'", aspect_ratio))
        })?;

        let item = self
            .store
            .get_item(item_id)
            .await?
            .ok_or_else(|| MenuError::ItemNotFound(item_id.to_string()))?;

        let bytes = decode_base64(image_data)?;
        let [small_size, large_size] = aspect.sizes();
        let (small, large) = tokio::task::spawn_blocking(move || {
            let source = image::load_from_memory(&bytes)
                .map_err(|e| ServiceError::Image(format!("Unreadable image: {}", e)))?;
            Ok::<_, ServiceError>((
                resize_to_jpeg(&source, small_size)?,
                resize_to_jpeg(&source, large_size)?,
            ))
        })
        .await
        .map_err(|e| ServiceError::Image(format!("Resize task failed: {}", e)))??;

        let version = Utc::now().timestamp_millis();
        let mut uploaded = Vec::new();
        let result = self
            .upload_and_attach(item, version, small, large, &mut uploaded)
            .await;

        if let Err(e) = &result {
            error!("Image resize for item {} failed: {}", item_id, e);
            self.cleanup(&uploaded).await;
        }
        result
    }

    async fn upload_and_attach(
        &self,
        mut item: ItemRecord,
        version: i64,
        small: Vec<u8>,
        large: Vec<u8>,
        uploaded: &mut Vec<String>,
    ) -> Result<ResizedImages, ServiceError> {
        let small_path = image_path(&item.id, version, "small");
        let small_url = self.storage.put(&small_path, small, "image/jpeg").await?;
        uploaded.push(small_path);

        let large_path = image_path(&item.id, version, "large");
        let large_url = self.storage.put(&large_path, large, "image/jpeg").await?;
        uploaded.push(large_path);

        let previous = item.image.replace(ItemImages {
            small_url: small_url.clone(),
            large_url: large_url.clone(),
        });
        self.store.save_item(&item).await?;

        info!("Stored resized images for item {}", item.id);

        // the record no longer references the old derivatives
        if let Some(previous) = previous {
            let retired: Vec<String> = [previous.small_url, previous.large_url]
                .iter()
                .filter_map(|url| self.storage_path(url))
                .filter(|path| !uploaded.contains(path))
                .collect();
            self.cleanup(&retired).await;
        }
        Ok(ResizedImages {
            small_url,
            large_url,
        })
    }

    /// Storage path behind one of our public URLs.
    fn storage_path(&self, url: &str) -> Option<String> {
        let base = self.storage.public_url("");
        url.strip_prefix(base.as_str())
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }

    async fn cleanup(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.storage.delete(path).await {
                warn!("Failed to remove derivative {}: {}", path, e);
            }
        }
    }
}

/// Each upload gets its own `version` directory, so a failed upload never
/// touches the derivatives the item record currently points at.
pub fn image_path(item_id: &str, version: i64, variant: &str) -> String {
    format!("images/items/{}/{}/{}.jpg", item_id, version, variant)
}

/// Accepts raw base64 or a `data:<mime>;base64,` URL.
fn decode_base64(data: &str) -> Result<Vec<u8>, ServiceError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(ServiceError::Validation("Image data is required".to_string()));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| ServiceError::Validation(format!("Image data is not valid base64: {}", e)))
}

/// Center-crop fill to exactly `(width, height)`, encoded as JPEG.
fn resize_to_jpeg(source: &DynamicImage, (width, height): (u32, u32)) -> Result<Vec<u8>, ServiceError> {
    let resized = source.resize_to_fill(width, height, FilterType::Lanczos3);
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))
        .map_err(|e| ServiceError::Image(format!("JPEG encoding failed: {}", e)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryMenuStore;
    use crate::storage::InMemoryObjectStorage;
    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};

    fn png_base64(width: u32, height: u32) -> String {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        STANDARD.encode(buffer.into_inner())
    }

    fn path_of(url: &str) -> &str {
        url.strip_prefix("memory://public/").unwrap()
    }

    async fn store_with_item() -> Arc<InMemoryMenuStore> {
        let store = Arc::new(InMemoryMenuStore::new());
        store
            .save_item(&ItemRecord {
                id: "i1".into(),
                name: "Soup".into(),
                description: None,
                price: 5.0,
                order: 0,
                flags: Default::default(),
                allergies: Vec::new(),
                options: Vec::new(),
                extras: Vec::new(),
                addons: Vec::new(),
                image: None,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_resize_wide_image() {
        let store = store_with_item().await;
        let storage = Arc::new(InMemoryObjectStorage::new());
        let svc = ImageService::new(store.clone(), storage.clone());

        let data = format!("data:image/png;base64,{}", png_base64(640, 640));
        let urls = svc.resize_item_image("i1", &data, "16:9").await.unwrap();
        let small_path = path_of(&urls.small_url);
        let large_path = path_of(&urls.large_url);
        assert!(small_path.starts_with("images/items/i1/") && small_path.ends_with("/small.jpg"));
        assert!(large_path.starts_with("images/items/i1/") && large_path.ends_with("/large.jpg"));

        let small = storage.object(small_path).unwrap();
        assert_eq!(small.content_type, "image/jpeg");
        let decoded = image::load_from_memory(&small.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (480, 270));

        let large = storage.object(large_path).unwrap();
        let decoded = image::load_from_memory(&large.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1280, 720));

        let item = store.get_item("i1").await.unwrap().unwrap();
        assert_eq!(item.image.unwrap().small_url, urls.small_url);
    }

    #[tokio::test]
    async fn test_failed_upload_removes_derivatives() {
        let store = store_with_item().await;
        let storage = Arc::new(InMemoryObjectStorage::failing_after(1));
        let svc = ImageService::new(store.clone(), storage.clone());

        let err = svc
            .resize_item_image("i1", &png_base64(50, 50), "1:1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert!(storage.is_empty());
        assert_eq!(store.get_item("i1").await.unwrap().unwrap().image, None);
    }

    #[tokio::test]
    async fn test_failed_reupload_keeps_current_images() {
        let store = store_with_item().await;
        let storage = Arc::new(InMemoryObjectStorage::new());
        let first = ImageService::new(store.clone(), storage.clone())
            .resize_item_image("i1", &png_base64(50, 50), "1:1")
            .await
            .unwrap();
        assert_eq!(storage.len(), 2);

        let failing = Arc::new(InMemoryObjectStorage::failing_after(3));
        for url in [&first.small_url, &first.large_url] {
            let object = storage.object(path_of(url)).unwrap();
            failing
                .put(path_of(url), object.bytes, &object.content_type)
                .await
                .unwrap();
        }

        // third put (new small) succeeds, fourth (new large) fails
        let err = ImageService::new(store.clone(), failing.clone())
            .resize_item_image("i1", &png_base64(60, 60), "1:1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));

        let image = store.get_item("i1").await.unwrap().unwrap().image.unwrap();
        assert_eq!(image.small_url, first.small_url);
        assert!(failing.object(path_of(&image.small_url)).is_some());
        assert!(failing.object(path_of(&image.large_url)).is_some());
        assert_eq!(failing.len(), 2);
    }

    #[tokio::test]
    async fn test_reupload_retires_previous_derivatives() {
        let store = store_with_item().await;
        let storage = Arc::new(InMemoryObjectStorage::new());
        let svc = ImageService::new(store.clone(), storage.clone());

        let first = svc
            .resize_item_image("i1", &png_base64(50, 50), "1:1")
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = svc
            .resize_item_image("i1", &png_base64(50, 50), "1:1")
            .await
            .unwrap();

        assert_ne!(first.small_url, second.small_url);
        assert_eq!(storage.len(), 2);
        assert!(storage.object(path_of(&second.large_url)).is_some());
        assert!(storage.object(path_of(&first.large_url)).is_none());
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let store = store_with_item().await;
        let storage = Arc::new(InMemoryObjectStorage::new());
        let svc = ImageService::new(store, storage.clone());

        assert!(matches!(
            svc.resize_item_image("i1", &png_base64(10, 10), "4:3").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.resize_item_image("i1", "%%%not-base64", "1:1").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.resize_item_image("i1", &STANDARD.encode(b"plain text"), "1:1").await,
            Err(ServiceError::Image(_))
        ));
        assert!(matches!(
            svc.resize_item_image("missing", &png_base64(10, 10), "1:1").await,
            Err(ServiceError::Domain(MenuError::ItemNotFound(_)))
        ));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(AspectRatio::parse("1:1"), Some(AspectRatio::Square));
        assert_eq!(AspectRatio::parse(" 16:9 "), Some(AspectRatio::Wide));
        assert_eq!(AspectRatio::parse("2:1"), None);
        assert_eq!(AspectRatio::Wide.sizes()[1], (1280, 720));
    }
}
