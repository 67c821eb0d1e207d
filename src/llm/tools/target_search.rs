//! 网页检索工具 - 将query清单分发给外部检索服务并合并结果

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use rig::tool::Tool;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::researcher::trace::SessionTrace;
use crate::search::SearchProvider;
use crate::types::{SearchBundle, SearchResult};

/// 合并结果中保留的最大图片数量
const MAX_IMAGES: usize = 6;

/// 网页检索工具
#[derive(Clone)]
pub struct AgentToolTargetSearch {
    provider: Arc<dyn SearchProvider>,
    config: SearchConfig,
    trace: Arc<SessionTrace>,
}

/// 网页检索参数
#[derive(Debug, Deserialize)]
pub struct TargetSearchArgs {
    /// 来自create_query输出的检索query列表
    pub queries: Vec<String>,
}

/// 网页检索工具错误
#[derive(Debug)]
pub struct TargetSearchToolError;

impl std::fmt::Display for TargetSearchToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Target search tool error")
    }
}

impl std::error::Error for TargetSearchToolError {}

/// 按字符边界截断文本，超长时追加省略号
fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut truncated: String = content.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

impl AgentToolTargetSearch {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        config: SearchConfig,
        trace: Arc<SessionTrace>,
    ) -> Self {
        Self {
            provider,
            config,
            trace,
        }
    }

    /// 并发执行全部query的检索并合并结果
    async fn search_all(&self, queries: &[String]) -> SearchBundle {
        let timeout = Duration::from_secs(self.config.query_timeout_seconds);

        let responses = futures::stream::iter(queries.iter().cloned().enumerate())
            .map(|(index, query)| {
                let provider = self.provider.clone();
                async move {
                    println!("   📡 检索query {}: '{}'...", index + 1, query);
                    match tokio::time::timeout(timeout, provider.search(&query)).await {
                        Ok(Ok(response)) => {
                            println!(
                                "   ✓ query {} 完成，返回 {} 条结果",
                                index + 1,
                                response.results.len()
                            );
                            response
                        }
                        Ok(Err(e)) => {
                            eprintln!("   ❌ query {} 检索出错: {}", index + 1, e);
                            Default::default()
                        }
                        Err(_) => {
                            eprintln!("   ⚠️ query {} 检索超时", index + 1);
                            Default::default()
                        }
                    }
                }
            })
            .buffer_unordered(self.config.max_concurrent_searches.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut results: Vec<SearchResult> = Vec::new();
        let mut images = Vec::new();
        for response in responses {
            results.extend(response.results.into_iter().map(|mut r| {
                r.content = truncate_content(&r.content, self.config.content_truncate_chars);
                r
            }));
            images.extend(response.images);
        }

        // 按相关性评分降序排列，保留靠前的结果
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let total_found = results.len();
        results.truncate(self.config.max_total_results);
        images.truncate(MAX_IMAGES);

        println!(
            "   🔎 检索汇总: 共找到 {} 条结果，保留评分最高的 {} 条",
            total_found,
            results.len()
        );

        SearchBundle { results, images }
    }
}

impl Tool for AgentToolTargetSearch {
    const NAME: &'static str = "target_search";

    type Error = TargetSearchToolError;
    type Args = TargetSearchArgs;
    type Output = SearchBundle;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "对create_query输出的全部query同时执行网页检索并返回合并结果。必须在create_query之后调用且只调用一次，把全部query放在一次调用中传入。返回的结果是生成最终摘要的唯一信息来源。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "queries": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "来自create_query输出的检索query列表"
                    }
                },
                "required": ["queries"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!(
            "   🔧 tool called...target_search，query数: {}",
            args.queries.len()
        );

        let mut queries = args.queries;
        if queries.len() > self.config.max_queries {
            println!(
                "   ⚠️ query数超过{}条，仅检索前{}条",
                self.config.max_queries, self.config.max_queries
            );
            queries.truncate(self.config.max_queries);
        }

        let bundle = self.search_all(&queries).await;

        let usage = self.trace.record_target_search(&bundle);
        if usage > 1 {
            println!(
                "   ⚠️ target_search被重复调用（第{}次），每个工具应只使用一次",
                usage
            );
        }

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::SearchResponse;
    use crate::search::{SearchError, SearchProvider};
    use crate::types::SearchImage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录收到的query并返回固定结果的检索桩
    struct StubProvider {
        seen: Mutex<Vec<String>>,
        fail_on: Option<String>,
        results_per_query: usize,
    }

    impl StubProvider {
        fn new(results_per_query: usize) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail_on: None,
                results_per_query,
            }
        }
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
            self.seen.lock().unwrap().push(query.to_string());
            if self.fail_on.as_deref() == Some(query) {
                return Err(SearchError::Api {
                    code: 500,
                    message: "boom".to_string(),
                });
            }
            let results = (0..self.results_per_query)
                .map(|i| SearchResult {
                    title: format!("{} result {}", query, i),
                    url: format!("https://example.com/{}/{}", query, i),
                    content: "x".repeat(300),
                    score: 1.0 - (i as f64) * 0.1,
                })
                .collect();
            Ok(SearchResponse {
                results,
                images: vec![SearchImage {
                    url: format!("https://example.com/{}.png", query),
                    description: None,
                }],
            })
        }
    }

    fn make_tool(provider: StubProvider) -> AgentToolTargetSearch {
        AgentToolTargetSearch::new(
            Arc::new(provider),
            SearchConfig {
                api_key: "tvly-test".to_string(),
                ..SearchConfig::default()
            },
            SessionTrace::new(),
        )
    }

    #[test]
    fn test_truncate_content_short_unchanged() {
        assert_eq!(truncate_content("hello", 200), "hello");
    }

    #[test]
    fn test_truncate_content_long_appends_ellipsis() {
        let long = "a".repeat(250);
        let truncated = truncate_content(&long, 200);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_content_multibyte_safe() {
        let text = "数".repeat(250);
        let truncated = truncate_content(&text, 200);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    #[tokio::test]
    async fn test_call_caps_queries_to_three() {
        let tool = make_tool(StubProvider::new(1));
        let args = TargetSearchArgs {
            queries: vec![
                "q1".to_string(),
                "q2".to_string(),
                "q3".to_string(),
                "q4".to_string(),
            ],
        };
        let bundle = tool.call(args).await.unwrap();

        // 每个query固定返回1条结果，4条query被截断为3条
        assert_eq!(bundle.results.len(), 3);
    }

    #[tokio::test]
    async fn test_call_merges_sorts_and_caps_results() {
        let tool = make_tool(StubProvider::new(5));
        let args = TargetSearchArgs {
            queries: vec!["q1".to_string(), "q2".to_string(), "q3".to_string()],
        };
        let bundle = tool.call(args).await.unwrap();

        // 3个query各5条结果，合并后限制为8条
        assert_eq!(bundle.results.len(), 8);
        // 评分降序
        for pair in bundle.results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // 内容被截断到200字符 + 省略号
        assert!(bundle.results[0].content.chars().count() <= 203);
    }

    #[tokio::test]
    async fn test_call_failed_query_degrades_to_empty() {
        let provider = StubProvider {
            seen: Mutex::new(Vec::new()),
            fail_on: Some("bad".to_string()),
            results_per_query: 2,
        };
        let tool = make_tool(provider);
        let args = TargetSearchArgs {
            queries: vec!["good".to_string(), "bad".to_string()],
        };
        let bundle = tool.call(args).await.unwrap();

        // 失败的query降级为空结果，不影响整体
        assert_eq!(bundle.results.len(), 2);
        assert!(bundle.results.iter().all(|r| r.title.starts_with("good")));
    }

    #[tokio::test]
    async fn test_call_empty_queries_returns_empty_bundle() {
        let tool = make_tool(StubProvider::new(2));
        let args = TargetSearchArgs { queries: vec![] };
        let bundle = tool.call(args).await.unwrap();
        assert!(bundle.is_empty());
    }
}
