//! HTTP document store client.

use std::time::Duration;

use async_trait::async_trait;
use atelier::documents::Document;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::gateway::{DocumentStore, Filter, GatewayError, Query};

/// Configuration for connecting to the document store.
#[derive(Debug, Clone)]
pub struct HttpDocumentStoreConfig {
    /// Store address, e.g. `"https://store.example.com"`.
    pub base_url: String,

    /// Optional API key sent as a bearer token.
    pub api_key: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the document store.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    config: HttpDocumentStoreConfig,
    base_url: Url,
    http: Client,
}

impl HttpDocumentStore {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store address is not a base URL or the HTTP client cannot be
    /// built.
    pub fn new(config: HttpDocumentStoreConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|error| GatewayError::InvalidBaseUrl(format!("{}: {error}", config.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl(config.base_url));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    /// Append path segments to the store address, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidBaseUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn expect_success(response: Response, action: &str) -> Result<Response, GatewayError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        Err(GatewayError::UnexpectedResponse(format!(
            "{action} failed with status {status}: {text}"
        )))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, GatewayError> {
        if id.is_empty() || id == "." || id == ".." {
            debug!(collection, id, "id cannot name a document");
            return Ok(None);
        }

        let url = self.endpoint(&["v1", "collections", collection, "documents", id])?;

        let response = self.authorize(self.http.get(url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(collection, id, "document not found");
            return Ok(None);
        }

        let response = Self::expect_success(response, "get").await?;
        let value: Value = response.json().await?;

        Ok(Some(Document::try_from(value)?))
    }

    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Document>, GatewayError> {
        let action = format!("{collection}:query");
        let url = self.endpoint(&["v1", "collections", &action])?;

        let body = QueryRequest {
            filters: query.filters(),
        };

        let response = self
            .authorize(self.http.post(url))
            .json(&body)
            .send()
            .await?;

        let response = Self::expect_success(response, "query").await?;
        let parsed: QueryResponse = response.json().await?;

        Ok(parsed
            .documents
            .into_iter()
            .filter_map(|value| match Document::try_from(value) {
                Ok(document) => Some(document),
                Err(error) => {
                    warn!(collection, %error, "skipping malformed document");
                    None
                }
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    filters: &'a [Filter],
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use atelier::documents::collections;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    use super::*;

    fn store(server: &MockServer, api_key: Option<&str>) -> Result<HttpDocumentStore, GatewayError> {
        HttpDocumentStore::new(HttpDocumentStoreConfig {
            base_url: format!("{}/", server.uri()),
            api_key: api_key.map(ToString::to_string),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn get_returns_document() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/products/documents/art-1"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "art-1", "name": "Dusk" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let document = store(&server, Some("secret"))?
            .get(collections::PRODUCTS, "art-1")
            .await?;

        assert_eq!(document.as_ref().map(|doc| doc.id.as_str()), Some("art-1"));
        assert_eq!(
            document.and_then(|doc| doc.fields.get("name").cloned()),
            Some(json!("Dusk"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_maps_not_found_to_none() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/products/documents/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let document = store(&server, None)?
            .get(collections::PRODUCTS, "missing")
            .await?;

        assert!(document.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_encodes_reserved_characters_in_ids() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/products/documents/secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "secret" })))
            .expect(0)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/products/documents/x%2F..%2Fsecret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "x/../secret" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/products/documents/secret%3Fx=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "secret?x=1" })))
            .expect(1)
            .mount(&server)
            .await;

        let store = store(&server, None)?;

        let traversal = store.get(collections::PRODUCTS, "x/../secret").await?;
        let query = store.get(collections::PRODUCTS, "secret?x=1").await?;
        let dots = store.get(collections::PRODUCTS, "..").await?;

        assert_eq!(traversal.map(|doc| doc.id), Some("x/../secret".to_string()));
        assert_eq!(query.map(|doc| doc.id), Some("secret?x=1".to_string()));
        assert!(dots.is_none());

        Ok(())
    }

    #[test]
    fn new_rejects_unusable_base_url() {
        let result = HttpDocumentStore::new(HttpDocumentStoreConfig {
            base_url: "mailto:store@example.com".to_string(),
            api_key: None,
            timeout: Duration::from_secs(5),
        });

        assert!(matches!(result, Err(GatewayError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn get_rejects_document_without_id() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/collections/products/documents/art-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Dusk" })))
            .mount(&server)
            .await;

        let result = store(&server, None)?.get(collections::PRODUCTS, "art-1").await;

        assert!(matches!(result, Err(GatewayError::Document(_))));

        Ok(())
    }

    #[tokio::test]
    async fn query_posts_filters_and_skips_malformed_documents() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/collections/productCategories:query"))
            .and(body_json(json!({
                "filters": [{ "field": "isActive", "op": "==", "value": true }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [
                    { "id": "c1", "name": "Paintings" },
                    { "name": "No id" },
                    "not an object"
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = Query::all().filter(Filter::equal("isActive", true));
        let documents = store(&server, None)?
            .query(collections::PRODUCT_CATEGORIES, &query)
            .await?;

        assert_eq!(documents.len(), 1);
        assert_eq!(documents.first().map(|doc| doc.id.as_str()), Some("c1"));

        Ok(())
    }

    #[tokio::test]
    async fn server_errors_are_reported() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = store(&server, None)?
            .query(collections::MENUS, &Query::all())
            .await;

        let Err(GatewayError::UnexpectedResponse(message)) = result else {
            return Err("expected an unexpected response error".into());
        };

        assert!(message.contains("503"));
        assert!(message.contains("maintenance"));

        Ok(())
    }
}
