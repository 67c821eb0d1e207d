//! Agent构建器 - 按配置组装带工具或不带工具的Agent

use crate::config::Config;
use crate::llm::tools::ResearchTools;

use super::providers::{ProviderAgent, ProviderClient};

/// Agent构建器
pub struct AgentBuilder<'a> {
    client: &'a ProviderClient,
    config: &'a Config,
}

impl<'a> AgentBuilder<'a> {
    pub fn new(client: &'a ProviderClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// 构建带调研工具的Agent，使用高能效模型
    pub fn build_agent_with_tools(
        &self,
        system_prompt: &str,
        tools: &ResearchTools,
    ) -> ProviderAgent {
        self.client.create_agent_with_tools(
            &self.config.llm.model_efficient,
            system_prompt,
            &self.config.llm,
            tools,
        )
    }

    /// 构建不带工具的Agent
    pub fn build_agent_without_tools(&self, system_prompt: &str) -> ProviderAgent {
        self.client
            .create_agent(&self.config.llm.model_efficient, system_prompt, &self.config.llm)
    }
}
