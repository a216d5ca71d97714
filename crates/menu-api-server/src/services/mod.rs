pub mod image_service;
pub mod listing_service;
pub mod publish_service;
pub mod translation_client;
pub mod translation_service;

pub use image_service::{AspectRatio, ImageService, ResizedImages};
pub use listing_service::ListingService;
pub use publish_service::{PublishOutcome, PublishService, UnpublishOutcome};
pub use translation_client::{GoogleTranslateClient, TranslationApi};
pub use translation_service::TranslationService;
