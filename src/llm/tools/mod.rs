//! 提供给调研Agent的工具集

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::researcher::trace::SessionTrace;
use crate::search::SearchProvider;

pub mod create_query;
pub mod target_search;

pub use create_query::AgentToolCreateQuery;
pub use target_search::AgentToolTargetSearch;

/// 调研工具包 - 固定工作流中的两个工具，共享同一个会话跟踪器
#[derive(Clone)]
pub struct ResearchTools {
    pub create_query: AgentToolCreateQuery,
    pub target_search: AgentToolTargetSearch,
}

impl ResearchTools {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        search_config: SearchConfig,
        trace: Arc<SessionTrace>,
    ) -> Self {
        Self {
            create_query: AgentToolCreateQuery::new(trace.clone()),
            target_search: AgentToolTargetSearch::new(provider, search_config, trace),
        }
    }
}
