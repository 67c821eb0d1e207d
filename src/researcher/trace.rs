//! 会话跟踪 - 记录工具调用序列，用于校验固定工作流的执行情况

use std::sync::{Arc, Mutex};

use crate::types::SearchBundle;

/// 工具调用事件
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    CreateQuery,
    TargetSearch,
}

impl ToolEvent {
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolEvent::CreateQuery => "Create Search Queries",
            ToolEvent::TargetSearch => "Search based on queries",
        }
    }
}

#[derive(Debug, Default)]
struct TraceInner {
    events: Vec<ToolEvent>,
    planned_queries: Vec<String>,
    last_bundle: Option<SearchBundle>,
}

/// 会话跟踪器 - 被两个工具共享，记录每次工具调用
#[derive(Debug, Default)]
pub struct SessionTrace {
    inner: Mutex<TraceInner>,
}

impl SessionTrace {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 记录一次create_query调用，返回该工具的累计调用次数
    pub fn record_create_query(&self, queries: &[String]) -> usize {
        let mut inner = self.inner.lock().expect("trace lock poisoned");
        inner.events.push(ToolEvent::CreateQuery);
        inner.planned_queries = queries.to_vec();
        inner
            .events
            .iter()
            .filter(|e| **e == ToolEvent::CreateQuery)
            .count()
    }

    /// 记录一次target_search调用，返回该工具的累计调用次数
    pub fn record_target_search(&self, bundle: &SearchBundle) -> usize {
        let mut inner = self.inner.lock().expect("trace lock poisoned");
        inner.events.push(ToolEvent::TargetSearch);
        inner.last_bundle = Some(bundle.clone());
        inner
            .events
            .iter()
            .filter(|e| **e == ToolEvent::TargetSearch)
            .count()
    }

    /// 获取最近一次检索的合并结果
    pub fn last_bundle(&self) -> Option<SearchBundle> {
        self.inner.lock().expect("trace lock poisoned").last_bundle.clone()
    }

    /// 获取create_query生成的query清单
    pub fn planned_queries(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("trace lock poisoned")
            .planned_queries
            .clone()
    }

    /// 工具调用序列是否恰好为 create_query → target_search 各一次
    pub fn is_optimal(&self) -> bool {
        let inner = self.inner.lock().expect("trace lock poisoned");
        inner.events == [ToolEvent::CreateQuery, ToolEvent::TargetSearch]
    }

    /// 生成工具使用情况报告
    pub fn usage_report(&self) -> String {
        let inner = self.inner.lock().expect("trace lock poisoned");
        if inner.events.is_empty() {
            return "未检测到任何工具调用".to_string();
        }

        let sequence = inner
            .events
            .iter()
            .map(ToolEvent::display_name)
            .collect::<Vec<_>>()
            .join(" → ");

        let create_count = inner
            .events
            .iter()
            .filter(|e| **e == ToolEvent::CreateQuery)
            .count();
        let search_count = inner
            .events
            .iter()
            .filter(|e| **e == ToolEvent::TargetSearch)
            .count();

        format!(
            "调用序列: {}\nCreate Search Queries: {} 次\nSearch based on queries: {} 次",
            sequence, create_count, search_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SearchBundle, SearchResult};

    fn sample_bundle() -> SearchBundle {
        SearchBundle {
            results: vec![SearchResult {
                title: "t".to_string(),
                url: "https://example.com".to_string(),
                content: "c".to_string(),
                score: 0.5,
            }],
            images: vec![],
        }
    }

    #[test]
    fn test_optimal_sequence() {
        let trace = SessionTrace::new();
        assert!(!trace.is_optimal());

        trace.record_create_query(&["q1".to_string()]);
        trace.record_target_search(&sample_bundle());
        assert!(trace.is_optimal());
    }

    #[test]
    fn test_repeated_calls_are_not_optimal() {
        let trace = SessionTrace::new();
        assert_eq!(trace.record_create_query(&[]), 1);
        assert_eq!(trace.record_create_query(&[]), 2);
        trace.record_target_search(&sample_bundle());
        assert!(!trace.is_optimal());
    }

    #[test]
    fn test_out_of_order_is_not_optimal() {
        let trace = SessionTrace::new();
        trace.record_target_search(&sample_bundle());
        trace.record_create_query(&[]);
        assert!(!trace.is_optimal());
    }

    #[test]
    fn test_last_bundle_and_planned_queries() {
        let trace = SessionTrace::new();
        assert!(trace.last_bundle().is_none());

        trace.record_create_query(&["q1".to_string(), "q2".to_string()]);
        trace.record_target_search(&sample_bundle());

        assert_eq!(trace.planned_queries(), vec!["q1".to_string(), "q2".to_string()]);
        assert_eq!(trace.last_bundle().unwrap().results.len(), 1);
    }

    #[test]
    fn test_usage_report_mentions_counts() {
        let trace = SessionTrace::new();
        assert!(trace.usage_report().contains("未检测到"));

        trace.record_create_query(&[]);
        trace.record_target_search(&sample_bundle());
        let report = trace.usage_report();
        assert!(report.contains("Create Search Queries: 1 次"));
        assert!(report.contains("Search based on queries: 1 次"));
    }
}
