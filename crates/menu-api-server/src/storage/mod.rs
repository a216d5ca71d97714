//! Public object storage (port) and its implementations

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::utils::error::ServiceError;

pub use local::LocalObjectStorage;
pub use memory::InMemoryObjectStorage;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Creates or overwrites `path` as a publicly readable object and
    /// returns its public URL.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, ServiceError>;

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, ServiceError>;

    /// Returns whether an object was actually removed.
    async fn delete(&self, path: &str) -> Result<bool, ServiceError>;

    fn public_url(&self, path: &str) -> String;
}

/// Rejects absolute paths and parent-directory segments.
pub(crate) fn validate_path(path: &str) -> Result<(), ServiceError> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|segment| segment.is_empty() || segment == "..");
    if bad {
        return Err(ServiceError::Validation(format!("Invalid storage path: {path}")));
    }
    Ok(())
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("menus/menu-1.json").is_ok());
        assert!(validate_path("../etc/passwd").is_err());
        assert!(validate_path("/abs").is_err());
        assert!(validate_path("a//b").is_err());
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://x/public/", "menus/a.json"), "http://x/public/menus/a.json");
    }
}
