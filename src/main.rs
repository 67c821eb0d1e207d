use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod i18n;
mod llm;
mod outlet;
mod researcher;
mod search;
mod types;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let query = args.query.clone();
    let config = args.into_config();

    let user_query = match query {
        Some(q) => q,
        None => {
            println!("🔍 firmlens 公司调研助手");
            println!("------------------------");
            println!("输入一条关于公司的查询，firmlens将生成检索query、联网检索并产出调研摘要与思维导图。");
            println!("示例: 'Tell me about Tesla's recent activities'、'Research Amazon's business model'\n");
            cli::read_query_interactive()?
        }
    };

    researcher::launch(&config, &user_query).await?;
    Ok(())
}
