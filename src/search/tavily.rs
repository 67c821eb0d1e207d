//! Tavily检索客户端

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ApiErrorBody, SearchRequest, SearchResponse, SearchResponseBody};
use super::{SearchError, SearchProvider};
use crate::config::SearchConfig;

const SEARCH_DEPTH: &str = "basic";

/// API KEY包装，避免在Debug输出中泄露
#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Tavily检索客户端
#[derive(Debug, Clone)]
pub struct TavilyClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
    max_results: usize,
    timeout: Duration,
}

impl TavilyClient {
    /// 根据检索配置创建客户端
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(SearchError::ApiKeyNotSet);
        }

        Ok(Self {
            http: Client::new(),
            api_key: ApiKey(api_key.to_string()),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results_per_query,
            timeout: Duration::from_secs(config.query_timeout_seconds),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            api_key: ApiKey("tvly-test".to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_results: 5,
            timeout: Duration::from_secs(5),
        }
    }

    async fn search_inner(&self, query: &str) -> Result<SearchResponseBody, SearchError> {
        let url = format!("{}/search", self.base_url);

        let request = SearchRequest {
            query: query.to_string(),
            search_depth: SEARCH_DEPTH.to_string(),
            max_results: self.max_results,
            include_images: true,
            include_image_descriptions: true,
            // 跳过原始网页内容以提升响应速度
            include_raw_content: false,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key.0)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.detail)
                .and_then(|detail| detail.error)
                .unwrap_or_else(|| {
                    let snippet: String = text.chars().take(200).collect();
                    format!("HTTP {}: {}", status, snippet)
                });
            return Err(SearchError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body: SearchResponseBody = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let body = self.search_inner(query).await?;
        Ok(SearchResponse::from(body))
    }
}
