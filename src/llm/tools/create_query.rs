//! 检索query生成工具

use std::sync::Arc;

use rig::tool::Tool;
use serde::Deserialize;

use crate::researcher::trace::SessionTrace;
use crate::types::{MAX_QUERIES, QueryPlan};

/// query生成工具 - query文本由模型生成，工具只负责截断上限与记录
#[derive(Clone)]
pub struct AgentToolCreateQuery {
    trace: Arc<SessionTrace>,
}

/// query生成参数
#[derive(Debug, Deserialize)]
pub struct CreateQueryArgs {
    /// 用户的原始查询
    #[allow(dead_code)]
    pub query: String,
    /// 模型生成的候选检索query列表
    pub queries: Vec<String>,
}

/// query生成工具错误
#[derive(Debug)]
pub struct CreateQueryToolError;

impl std::fmt::Display for CreateQueryToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Create query tool error")
    }
}

impl std::error::Error for CreateQueryToolError {}

impl AgentToolCreateQuery {
    pub fn new(trace: Arc<SessionTrace>) -> Self {
        Self { trace }
    }
}

impl Tool for AgentToolCreateQuery {
    const NAME: &'static str = "create_query";

    type Error = CreateQueryToolError;
    type Args = CreateQueryArgs;
    type Output = QueryPlan;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "根据用户的公司查询生成2-3条聚焦的检索query。query文本由你（模型）生成并通过参数传入，本工具会把超出3条的部分截断。调用本工具之后，必须把返回的全部query一次性传给target_search工具。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "用户关于公司的原始查询"
                    },
                    "queries": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "生成的检索query列表（最多3条），每条应简短且高度聚焦"
                    }
                },
                "required": ["query", "queries"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...create_query，候选query数: {}", args.queries.len());

        if args.queries.len() > MAX_QUERIES {
            println!(
                "   ⚠️ 候选query超过{}条，截断保留前{}条",
                MAX_QUERIES, MAX_QUERIES
            );
        }

        let plan = QueryPlan::capped(args.queries);

        let usage = self.trace.record_create_query(&plan.queries);
        if usage > 1 {
            println!(
                "   ⚠️ create_query被重复调用（第{}次），每个工具应只使用一次",
                usage
            );
        }

        for (i, q) in plan.queries.iter().enumerate() {
            println!("      {}. {}", i + 1, q);
        }

        Ok(plan)
    }
}
