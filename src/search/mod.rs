//! 网页检索服务 - 对接外部检索API

use async_trait::async_trait;

mod tavily;
pub mod types;

pub use tavily::TavilyClient;
pub use types::SearchResponse;

/// 检索服务错误
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("TAVILY_API_KEY not set. Get one at https://app.tavily.com")]
    ApiKeyNotSet,

    #[error("Search API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("Search API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// 检索服务抽象 - 生产环境由TavilyClient实现，测试中可用桩实现替代
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// 对单个query执行一次网页检索
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError>;
}
