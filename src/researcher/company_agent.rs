//! 公司调研Agent - 固定三步工作流的执行者
//!
//! 1. 工具阶段：Agent在严格的工作流指令下依次调用create_query与target_search，
//!    并基于检索结果草拟调研发现；
//! 2. 组装阶段：Extractor基于草稿与原始检索结果生成结构化的最终产出；
//! 3. 校验阶段：根据会话跟踪复核工具调用序列，偏离时告警但不中断。

use std::sync::Arc;

use anyhow::Result;

use crate::llm::tools::ResearchTools;
use crate::researcher::context::ResearchContext;
use crate::search::TavilyClient;
use crate::types::{CompanyResearchOutput, SearchBundle};

/// 公司调研Agent
#[derive(Default)]
pub struct CompanyResearchAgent;

impl CompanyResearchAgent {
    /// 执行完整的调研工作流
    pub async fn execute(
        &self,
        context: &ResearchContext,
        user_query: &str,
    ) -> Result<CompanyResearchOutput> {
        let provider = TavilyClient::from_config(&context.config.search)?;
        let tools = ResearchTools::new(
            Arc::new(provider),
            context.config.search.clone(),
            context.trace.clone(),
        );
        self.execute_with_tools(context, user_query, &tools).await
    }

    /// 使用给定的工具包执行调研工作流
    pub async fn execute_with_tools(
        &self,
        context: &ResearchContext,
        user_query: &str,
        tools: &ResearchTools,
    ) -> Result<CompanyResearchOutput> {
        // 工具阶段：模型在严格工作流指令下调用工具并草拟调研发现
        let research_system_prompt = self.research_system_prompt(context);
        let draft = context
            .llm_client
            .prompt_with_tools(&research_system_prompt, user_query, tools)
            .await?;

        // 校验工具调用序列
        if context.trace.is_optimal() {
            println!("✅ 工具使用符合预期: 每个工具恰好按顺序使用一次");
        } else {
            println!("⚠️ 工具使用偏离预期工作流:\n{}", context.trace.usage_report());
        }

        let bundle = context.trace.last_bundle().unwrap_or_default();
        if bundle.is_empty() {
            println!("⚠️ 未获得任何检索结果，摘要将仅基于模型草稿生成");
        }

        // 组装阶段：基于草稿与原始检索结果提取结构化产出
        let compose_system_prompt = self.compose_system_prompt(context);
        let compose_user_prompt = self.build_compose_prompt(user_query, &draft, &bundle);

        let output: CompanyResearchOutput = context
            .llm_client
            .extract(&compose_system_prompt, &compose_user_prompt)
            .await?;

        Ok(output)
    }

    /// 工具阶段的系统提示词 - 强制固定的工具调用顺序
    fn research_system_prompt(&self, context: &ResearchContext) -> String {
        let instruction = r#"你是一个公司调研助手，帮助用户快速、高效地收集公司的详细信息。

严格工作流 - 你必须按顺序执行以下步骤，每步恰好一次：
1. 首先，针对用户关于公司的查询，调用create_query工具恰好一次，生成2-3条聚焦的检索query。
   - query应简短、具体且彼此差异化，以获得更好的检索效果
   - 质量优先于数量，少而精的query效果优于多而泛的query
   - 不要重复调用该工具，所有query在一次调用中生成
2. 重要：拿到检索query后，必须调用target_search工具恰好一次，并传入全部query。
   - 把第1步产出的全部query放在一次调用中传入
   - 该步骤不可跳过，联网检索是获取公司最新信息的唯一途径
   - 不要多次调用该工具，它会同时检索全部query并返回合并结果
3. 仅基于target_search返回的检索结果，草拟一份简明但全面的调研发现，
   覆盖公司概况、产品、财务、近期动态，并在相关处引用1-2条来源原文。

关键顺序：调用create_query一次 → 调用target_search一次并传入全部query → 输出调研发现。
优先保证速度，信息收集耗时过长时使用已有信息完成任务。"#;

        format!(
            "{}\n\n{}",
            instruction,
            context.config.target_language.prompt_instruction()
        )
    }

    /// 组装阶段的系统提示词
    fn compose_system_prompt(&self, context: &ResearchContext) -> String {
        let instruction = r#"你是一个公司调研报告编辑。基于提供的调研发现草稿和原始检索结果，生成结构化的最终产出：

1. markdown_summary：markdown格式的调研摘要
   - 分节组织（公司概况、产品、财务、近期动态），每节简明扼要
   - 只保留最重要的信息点
   - 相关处引用1-2条来源原文
2. mindmap：以公司名为根节点的思维导图树
   - 根节点下设3-5个主要分支（产品、财务等）
   - 每个节点有稳定的id和简短的label
   - 仅在图片与节点内容直接相关时填写image_url

仅使用调研材料中的信息，不要编造事实。"#;

        format!(
            "{}\n\n{}",
            instruction,
            context.config.target_language.prompt_instruction()
        )
    }

    /// 组装阶段的用户提示词 - 拼接用户查询、草稿与原始检索结果
    fn build_compose_prompt(
        &self,
        user_query: &str,
        draft: &str,
        bundle: &SearchBundle,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str("## 用户的原始查询\n");
        prompt.push_str(user_query);
        prompt.push_str("\n\n## 调研发现草稿\n");
        prompt.push_str(draft);

        if !bundle.results.is_empty() {
            prompt.push_str("\n\n## 原始检索结果\n");
            for (i, result) in bundle.results.iter().enumerate() {
                prompt.push_str(&format!(
                    "{}. {}\n   URL: {}\n   内容: {}\n",
                    i + 1,
                    result.title,
                    result.url,
                    result.content
                ));
            }
        }

        if !bundle.images.is_empty() {
            prompt.push_str("\n## 可用图片\n");
            for image in &bundle.images {
                match &image.description {
                    Some(desc) => prompt.push_str(&format!("- {} ({})\n", image.url, desc)),
                    None => prompt.push_str(&format!("- {}\n", image.url)),
                }
            }
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{SearchImage, SearchResult};

    fn make_context() -> ResearchContext {
        ResearchContext::new(Config::default()).unwrap()
    }

    #[test]
    fn test_research_system_prompt_contains_workflow_and_language() {
        let context = make_context();
        let prompt = CompanyResearchAgent.research_system_prompt(&context);

        assert!(prompt.contains("create_query"));
        assert!(prompt.contains("target_search"));
        assert!(prompt.contains(context.config.target_language.prompt_instruction()));
    }

    #[test]
    fn test_compose_prompt_includes_draft_and_sources() {
        let bundle = SearchBundle {
            results: vec![SearchResult {
                title: "Acme overview".to_string(),
                url: "https://example.com/acme".to_string(),
                content: "Acme makes widgets.".to_string(),
                score: 0.9,
            }],
            images: vec![SearchImage {
                url: "https://example.com/logo.png".to_string(),
                description: Some("Acme logo".to_string()),
            }],
        };

        let prompt = CompanyResearchAgent.build_compose_prompt(
            "Tell me about Acme",
            "Acme is a widget maker.",
            &bundle,
        );

        assert!(prompt.contains("Tell me about Acme"));
        assert!(prompt.contains("Acme is a widget maker."));
        assert!(prompt.contains("https://example.com/acme"));
        assert!(prompt.contains("Acme logo"));
    }

    #[test]
    fn test_compose_prompt_without_results_omits_sources_section() {
        let prompt = CompanyResearchAgent.build_compose_prompt(
            "Tell me about Acme",
            "draft",
            &SearchBundle::default(),
        );

        assert!(!prompt.contains("原始检索结果"));
        assert!(!prompt.contains("可用图片"));
    }
}
