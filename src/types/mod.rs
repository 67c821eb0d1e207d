//! 公司调研工作流中流转的结构化数据类型

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 单次调研允许的最大检索query数量
pub const MAX_QUERIES: usize = 3;

/// create_query工具的输出 - 检索query清单
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryPlan {
    /// 将被直接传递给target_search工具的检索query列表，最多3条
    pub queries: Vec<String>,
}

impl QueryPlan {
    /// 从候选query列表构建，超出上限的部分按原始顺序截断丢弃
    pub fn capped(candidates: Vec<String>) -> Self {
        let mut queries = candidates;
        queries.truncate(MAX_QUERIES);
        Self { queries }
    }
}

/// 单条网页检索结果
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    /// 检索服务返回的相关性评分，越高越相关
    pub score: f64,
}

/// 检索到的配图信息，供思维导图节点引用
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchImage {
    pub url: String,
    pub description: Option<String>,
}

/// target_search工具的输出 - 多个query的合并检索结果
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchBundle {
    /// 按相关性评分降序排列的检索结果
    pub results: Vec<SearchResult>,
    /// 检索过程中收集到的相关图片
    #[serde(default)]
    pub images: Vec<SearchImage>,
}

impl SearchBundle {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// 思维导图节点 - 以公司名为根的树状结构
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MindmapNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MindmapNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MindmapNode {
    /// 统计包含自身在内的节点总数
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(MindmapNode::node_count)
            .sum::<usize>()
    }
}

/// 公司调研的最终结构化产出
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompanyResearchOutput {
    /// markdown格式的调研摘要
    pub markdown_summary: String,
    /// 以公司名为根节点的思维导图
    pub mindmap: MindmapNode,
}
