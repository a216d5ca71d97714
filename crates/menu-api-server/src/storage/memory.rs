use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{join_url, validate_path, ObjectStorage};
use crate::utils::error::ServiceError;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Process-local storage. `fail_puts_after` makes the n-th and later
/// uploads fail, for exercising cleanup paths.
#[derive(Default)]
pub struct InMemoryObjectStorage {
    objects: DashMap<String, StoredObject>,
    puts: AtomicUsize,
    fail_puts_after: Option<usize>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(successful_puts: usize) -> Self {
        Self {
            fail_puts_after: Some(successful_puts),
            ..Self::default()
        }
    }

    pub fn object(&self, path: &str) -> Option<StoredObject> {
        self.objects.get(path).map(|o| o.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ServiceError> {
        validate_path(path)?;
        let attempt = self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts_after.is_some_and(|limit| attempt >= limit) {
            return Err(ServiceError::Storage(format!("upload of {path} rejected")));
        }
        self.objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.public_url(path))
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.objects.get(path).map(|o| o.bytes.clone()))
    }

    async fn delete(&self, path: &str) -> Result<bool, ServiceError> {
        Ok(self.objects.remove(path).is_some())
    }

    fn public_url(&self, path: &str) -> String {
        join_url("memory://public", path)
    }
}
