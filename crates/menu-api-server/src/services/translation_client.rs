use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::TranslationConfig;
use crate::utils::error::ServiceError;

const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Third-party machine translation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationApi: Send + Sync {
    /// Translates every text in one request; output order matches input.
    async fn translate(
        &self,
        texts: Vec<String>,
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, ServiceError>;
}

/// Client for a Google Translate v2 style endpoint.
#[derive(Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    config: TranslationConfig,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translated>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translated {
    translated_text: String,
}

impl GoogleTranslateClient {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }
}

#[async_trait]
impl TranslationApi for GoogleTranslateClient {
    async fn translate(
        &self,
        texts: Vec<String>,
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, ServiceError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/language/translate/v2",
            self.config.base_url.trim_end_matches('/')
        );
        let request = TranslateRequest {
            q: &texts,
            source,
            target,
            format: "text",
        };

        debug!("Translating {} segments {} -> {}", texts.len(), source, target);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Translation(format!("Network error: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::Translation(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Translation(format!("Unreadable response: {}", e)))?;

        if body.data.translations.len() != texts.len() {
            return Err(ServiceError::Translation(format!(
                "Expected {} translations, got {}",
                texts.len(),
                body.data.translations.len()
            )));
        }

        Ok(body
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GoogleTranslateClient {
        GoogleTranslateClient::new(TranslationConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            timeout_seconds: 5,
        })
    }

    #[tokio::test]
    async fn test_translate_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .and(header("X-Goog-Api-Key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "q": ["Soup", "Hot"], "source": "en", "target": "es"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "translations": [
                    { "translatedText": "Sopa" },
                    { "translatedText": "Caliente" }
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let out = client_for(&server)
            .translate(vec!["Soup".into(), "Hot".into()], "en", "es")
            .await
            .unwrap();
        assert_eq!(out, vec!["Sopa", "Caliente"]);
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quota"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .translate(vec!["Soup".into()], "en", "fr")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Translation(_)));
    }

    #[tokio::test]
    async fn test_network_error_hides_api_key() {
        let client = GoogleTranslateClient::new(TranslationConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "SUPERSECRET".to_string(),
            timeout_seconds: 2,
        });

        let err = client
            .translate(vec!["Soup".into()], "en", "fr")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Translation(_)));
        assert!(!err.to_string().contains("SUPERSECRET"));
    }

    #[tokio::test]
    async fn test_count_mismatch_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "translations": [] }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .translate(vec!["Soup".into()], "en", "fr")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Translation(_)));
    }
}
