use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use anyhow::{Result, anyhow};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// firmlens - 由Rust与AI驱动的公司调研助手
#[derive(Parser, Debug)]
#[command(name = "firmlens")]
#[command(
    about = "AI-powered company research assistant. It generates focused search queries, performs web searches, and produces a markdown summary plus a mindmap-style JSON structure about a company."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 关于公司的自然语言查询，缺省时从标准输入读取
    pub query: Option<String>,

    /// 调研报告输出路径
    #[arg(short, long, default_value = "./firmlens.report")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 高能效模型，优先用于常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于复杂推理任务，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// ReAct工具调用循环的最大迭代次数
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 检索服务API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 每个query返回的最大检索结果数
    #[arg(long)]
    pub max_search_results: Option<usize>,

    /// 目标语言 (zh, en, ja, ko, de, fr, ru)
    #[arg(long)]
    pub target_language: Option<String>,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("firmlens.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 覆盖配置文件中的设置
        config.output_path = self.output_path;

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.llm.max_iterations = max_iterations;
        }

        // 覆盖检索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(max_search_results) = self.max_search_results {
            config.search.max_results_per_query = max_search_results;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)",
                    target_language_str
                );
            }
        }

        // 其他配置
        config.verbose = self.verbose;

        config
    }
}

/// 从标准输入读取一条调研查询
pub fn read_query_interactive() -> Result<String> {
    print!("请输入你的公司调研查询: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    let query = line.trim().to_string();
    if query.is_empty() {
        return Err(anyhow!("查询不能为空"));
    }
    Ok(query)
}

// Include tests
#[cfg(test)]
mod tests;
