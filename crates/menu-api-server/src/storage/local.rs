use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{join_url, validate_path, ObjectStorage};
use crate::utils::error::ServiceError;

/// Objects as files under `root`, served publicly at `public_base_url`.
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ServiceError> {
        validate_path(path)?;
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        // readers must never observe a half-written snapshot
        let staging = target.with_extension("partial");
        fs::write(&staging, &bytes).await?;
        fs::rename(&staging, &target).await?;

        debug!("Stored {} ({} bytes, {})", path, bytes.len(), content_type);
        Ok(self.public_url(path))
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        validate_path(path)?;
        match fs::read(self.root.join(path)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<bool, ServiceError> {
        validate_path(path)?;
        match fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
