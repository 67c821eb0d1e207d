//! 公司调研工作流
//!
//! 固定的三步流水线：生成检索query → 联网检索 → 生成摘要与思维导图。
//! 步骤顺序通过系统提示词约束模型，并由会话跟踪在代码层复核。

use anyhow::Result;

use crate::config::Config;
use crate::types::CompanyResearchOutput;

pub mod company_agent;
pub mod context;
pub mod progress;
pub mod trace;

use company_agent::CompanyResearchAgent;
use context::ResearchContext;
use progress::{PhaseKeys, PhaseTimer, ProgressReporter};

/// 启动公司调研工作流
pub async fn launch(config: &Config, user_query: &str) -> Result<CompanyResearchOutput> {
    let context = ResearchContext::new(config.clone())?;

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    if config.verbose {
        println!(
            "🌐 目标语言: {} | LLM Provider: {}",
            config.target_language.display_name(),
            config.llm.provider
        );
    }

    println!("\n⏳ 开始调研...（可能需要几十秒）");

    let mut timer = PhaseTimer::new();
    let reporter = ProgressReporter::start(context.trace.clone());

    // 执行调研工作流
    timer.start_phase(PhaseKeys::RESEARCH);
    let agent = CompanyResearchAgent;
    let output = agent.execute(&context, user_query).await?;
    timer.end_phase(PhaseKeys::RESEARCH);
    drop(reporter);

    // 输出结果
    timer.start_phase(PhaseKeys::OUTPUT);
    crate::outlet::save(&context, &output).await?;
    timer.end_phase(PhaseKeys::OUTPUT);

    println!(
        "\n✅ 调研完成，耗时 {:.1} 秒!",
        timer.total_duration().as_secs_f64()
    );
    if context.config.verbose {
        println!("{}", timer.generate_timing_report());
        println!("🔧 工具使用情况:\n{}", context.trace.usage_report());
    }

    Ok(output)
}
