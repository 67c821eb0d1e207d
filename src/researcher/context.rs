use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::researcher::trace::SessionTrace;

/// 调研上下文 - 单次调研运行期间共享的状态，运行结束即丢弃
#[derive(Clone)]
pub struct ResearchContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 配置
    pub config: Config,
    /// 会话跟踪器，记录工具调用序列
    pub trace: Arc<SessionTrace>,
    /// 会话ID
    pub session_id: Uuid,
    /// 会话开始时间
    pub started_at: DateTime<Utc>,
}

impl ResearchContext {
    /// 创建新的调研上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let trace = SessionTrace::new();

        Ok(Self {
            llm_client,
            config,
            trace,
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
        })
    }
}
