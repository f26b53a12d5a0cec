use std::time::Duration;

use async_trait::async_trait;
use common::search_result::Product;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::config::TypesenseConfig;

pub const API_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResponse<T> {
    #[serde(default)]
    pub facet_counts: Vec<RawFacetCounts>,
    #[serde(default)]
    pub found: u64,
    #[serde(default = "Vec::new")]
    pub hits: Vec<RawSearchHit<T>>,
    #[serde(default)]
    pub search_time_ms: u64,
    #[serde(default)]
    pub page: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchHit<T> {
    pub document: T,
    #[serde(default)]
    pub highlights: Vec<RawHighlight>,
    #[serde(default)]
    pub text_match: u64,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawHighlight {
    pub field: String,
    #[serde(default)]
    pub snippet: Option<String>,
    // array fields report one snippet per matched element
    #[serde(default)]
    pub snippets: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawFacetCounts {
    pub field_name: String,
    #[serde(default)]
    pub counts: Vec<RawFacetCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawFacetCount {
    pub count: u64,
    #[serde(default)]
    pub highlighted: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    ok: bool,
}

/// Query string of `GET /collections/{collection}/documents/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchParameters {
    pub q: String,
    pub query_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_by: Option<String>,
    pub sort_by: String,
    pub facet_by: String,
    pub max_facet_values: u32,
    pub page: u32,
    pub per_page: u32,
    pub highlight_fields: String,
    pub highlight_start_tag: String,
    pub highlight_end_tag: String,
    pub snippet_threshold: u32,
    pub num_typos: String,
    pub prefix: bool,
    pub enable_overrides: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchServiceError {
    #[error("search service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("failed to decode search service response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid search service url: {0}")]
    InvalidUrl(String),
}

/// The operations the storefront needs from the hosted search engine.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search_documents(
        &self,
        collection: &str,
        params: &SearchParameters,
    ) -> Result<RawSearchResponse<Product>, SearchServiceError>;

    async fn retrieve_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Product, SearchServiceError>;

    async fn health(&self) -> Result<bool, SearchServiceError>;
}

/// Typesense over HTTP. Construct once at startup and share it.
#[derive(Debug, Clone)]
pub struct TypesenseClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl TypesenseClient {
    pub fn new(config: &TypesenseConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.connection_timeout_seconds))
            .build()?;
        Self::with_http_client(http, &config.base_url(), &config.search_only_api_key)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: &str,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Search service url cannot be used as a base: {}", base_url);
        }
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SearchServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        url: Url,
        query: Option<&Q>,
    ) -> Result<T, SearchServiceError> {
        let t0 = std::time::Instant::now();
        let mut request = self.http.get(url.clone()).header(API_KEY_HEADER, &self.api_key);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(SearchServiceError::Status {
                status: status.as_u16(),
                body: response_txt,
            });
        }
        tracing::debug!(
            path = url.path(),
            len = response_txt.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "search service response"
        );
        Ok(serde_json::from_str(&response_txt)?)
    }
}

#[async_trait]
impl SearchService for TypesenseClient {
    async fn search_documents(
        &self,
        collection: &str,
        params: &SearchParameters,
    ) -> Result<RawSearchResponse<Product>, SearchServiceError> {
        let url = self.endpoint(&["collections", collection, "documents", "search"])?;
        self.get_json(url, Some(params)).await
    }

    async fn retrieve_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Product, SearchServiceError> {
        let url = self.endpoint(&["collections", collection, "documents", id])?;
        match self.get_json::<Product, ()>(url, None).await {
            Err(SearchServiceError::Status { status: 404, .. }) => {
                Err(SearchServiceError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    async fn health(&self) -> Result<bool, SearchServiceError> {
        let url = self.endpoint(&["health"])?;
        let health = self.get_json::<RawHealth, ()>(url, None).await?;
        Ok(health.ok)
    }
}
