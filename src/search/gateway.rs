use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::IndexConfig;
use crate::models::{Bucket, DependencySlot, ModuleHit};
use crate::search::query::{MultiGetRequest, SearchRequest};

/// Executes built requests against the module index.
///
/// Errors are returned as-is to the caller; nothing here retries or
/// recovers partial results.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// One slot per requested id, in request order.
    async fn multi_get(&self, request: &MultiGetRequest) -> Result<Vec<DependencySlot>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub hits: Vec<ModuleHit>,
}

#[derive(Debug, Deserialize)]
struct MultiGetResponse {
    docs: Vec<DependencySlot>,
}

impl SearchResponse {
    /// Buckets of a top-level terms aggregation.
    pub fn buckets(&self, agg: &str) -> Result<Vec<Bucket>> {
        decode_buckets(&self.aggregations, agg)
    }

    /// Buckets of `inner` under the first bucket of `outer`.
    ///
    /// `None` when `outer` produced no buckets at all.
    pub fn first_nested_buckets(&self, outer: &str, inner: &str) -> Result<Option<Vec<Bucket>>> {
        let outer_buckets: Vec<Map<String, Value>> = decode_buckets(&self.aggregations, outer)?;
        match outer_buckets.first() {
            Some(first) => decode_buckets(first, inner).map(Some),
            None => Ok(None),
        }
    }
}

fn decode_buckets<T: DeserializeOwned>(aggs: &Map<String, Value>, name: &str) -> Result<Vec<T>> {
    let buckets = aggs
        .get(name)
        .and_then(|agg| agg.get("buckets"))
        .with_context(|| format!("Aggregation '{name}' missing from response"))?;
    serde_json::from_value(buckets.clone())
        .with_context(|| format!("Failed to parse buckets of aggregation '{name}'"))
}

/// Gateway speaking the Elasticsearch REST API over HTTP.
pub struct ElasticsearchGateway {
    client: reqwest::Client,
    search_url: String,
    mget_url: String,
}

impl ElasticsearchGateway {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            search_url: config.endpoint("_search"),
            mget_url: config.endpoint("_mget"),
        })
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!("POST {url}");

        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach search index at {url}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Search index returned {status}: {body}");
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

#[async_trait]
impl SearchGateway for ElasticsearchGateway {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.post(&self.search_url, request).await
    }

    async fn multi_get(&self, request: &MultiGetRequest) -> Result<Vec<DependencySlot>> {
        let resp: MultiGetResponse = self.post(&self.mget_url, request).await?;
        Ok(resp.docs)
    }
}
