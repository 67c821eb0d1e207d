//! 调研结果输出 - 控制台展示与磁盘存储

use anyhow::{Context as _, Result};
use std::fs;
use std::path::PathBuf;

use crate::researcher::context::ResearchContext;
use crate::types::CompanyResearchOutput;

/// 保存并展示调研结果
pub async fn save(context: &ResearchContext, output: &CompanyResearchOutput) -> Result<()> {
    let console = ConsoleOutlet;
    console.save(context, output).await?;

    let disk = DiskOutlet::new(context.config.output_path.clone());
    disk.save(context, output).await
}

pub trait Outlet {
    async fn save(&self, context: &ResearchContext, output: &CompanyResearchOutput) -> Result<()>;
}

/// 控制台输出
pub struct ConsoleOutlet;

impl Outlet for ConsoleOutlet {
    async fn save(&self, _context: &ResearchContext, output: &CompanyResearchOutput) -> Result<()> {
        println!("\n📝 调研摘要:");
        println!("===========");
        println!("{}", output.markdown_summary);

        println!("\n🌳 思维导图:");
        println!("===========");
        println!("{}", serde_json::to_string_pretty(&output.mindmap)?);

        Ok(())
    }
}

/// 磁盘输出 - 将摘要与思维导图写入输出目录
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// 调研摘要的markdown全文，含生成信息尾注
    fn render_report(&self, context: &ResearchContext, output: &CompanyResearchOutput) -> String {
        format!(
            "{}\n\n---\n\n*Generated by firmlens at {} (session `{}`)*\n",
            output.markdown_summary,
            context.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            context.session_id
        )
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, context: &ResearchContext, output: &CompanyResearchOutput) -> Result<()> {
        println!("\n🖊️ 调研报告存储中...");

        fs::create_dir_all(&self.output_dir)
            .context(format!("Failed to create output dir: {:?}", self.output_dir))?;

        let report_path = self.output_dir.join("report.md");
        fs::write(&report_path, self.render_report(context, output))?;
        println!("💾 已保存调研摘要: {}", report_path.display());

        let mindmap_path = self.output_dir.join("mindmap.json");
        fs::write(
            &mindmap_path,
            serde_json::to_string_pretty(&output.mindmap)?,
        )?;
        println!("💾 已保存思维导图: {}", mindmap_path.display());

        println!("💾 报告保存完成，输出目录: {}", self.output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::MindmapNode;
    use tempfile::TempDir;

    fn sample_output() -> CompanyResearchOutput {
        CompanyResearchOutput {
            markdown_summary: "# Acme\n\nAcme makes widgets.".to_string(),
            mindmap: MindmapNode {
                id: "root".to_string(),
                label: "Acme".to_string(),
                children: Some(vec![MindmapNode {
                    id: "products".to_string(),
                    label: "Products".to_string(),
                    children: None,
                    image_url: None,
                }]),
                image_url: None,
            },
        }
    }

    #[tokio::test]
    async fn test_disk_outlet_writes_report_and_mindmap() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("report");

        let mut config = Config::default();
        config.output_path = output_dir.clone();
        let context = ResearchContext::new(config).unwrap();

        let outlet = DiskOutlet::new(output_dir.clone());
        outlet.save(&context, &sample_output()).await.unwrap();

        let report = fs::read_to_string(output_dir.join("report.md")).unwrap();
        assert!(report.contains("Acme makes widgets."));
        assert!(report.contains("Generated by firmlens"));

        let mindmap: MindmapNode =
            serde_json::from_str(&fs::read_to_string(output_dir.join("mindmap.json")).unwrap())
                .unwrap();
        assert_eq!(mindmap.label, "Acme");
        assert_eq!(mindmap.node_count(), 2);
    }

    #[tokio::test]
    async fn test_disk_outlet_overwrites_existing_report() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().to_path_buf();
        fs::write(output_dir.join("report.md"), "old content").unwrap();

        let mut config = Config::default();
        config.output_path = output_dir.clone();
        let context = ResearchContext::new(config).unwrap();

        let outlet = DiskOutlet::new(output_dir.clone());
        outlet.save(&context, &sample_output()).await.unwrap();

        let report = fs::read_to_string(output_dir.join("report.md")).unwrap();
        assert!(!report.contains("old content"));
    }
}
