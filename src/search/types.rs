//! Tavily检索API的请求与响应类型

use serde::{Deserialize, Serialize};

use crate::types::{SearchImage, SearchResult};

#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub max_results: usize,
    pub include_images: bool,
    pub include_image_descriptions: bool,
    pub include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponseBody {
    #[serde(default)]
    pub results: Vec<ResultItem>,
    #[serde(default)]
    pub images: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct ImageItem {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub error: Option<String>,
}

/// 单个query的检索结果
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub images: Vec<SearchImage>,
}

impl From<SearchResponseBody> for SearchResponse {
    fn from(body: SearchResponseBody) -> Self {
        let results = body
            .results
            .into_iter()
            .map(|item| SearchResult {
                title: item.title,
                url: item.url,
                content: item.content,
                score: item.score,
            })
            .collect();
        let images = body
            .images
            .into_iter()
            .map(|item| SearchImage {
                url: item.url,
                description: item.description,
            })
            .collect();
        Self { results, images }
    }
}
