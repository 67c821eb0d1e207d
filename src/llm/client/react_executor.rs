//! ReAct执行器 - 驱动Agent的多轮工具调用循环

use anyhow::Result;
use rig::completion::{AssistantContent, Message, PromptError};

use super::providers::ProviderAgent;

/// ReAct执行器
pub struct ReActExecutor;

impl ReActExecutor {
    /// 执行ReAct循环逻辑，达到最大迭代次数时回退到聊天历史中的部分结果
    pub async fn execute(
        agent: &ProviderAgent,
        user_prompt: &str,
        max_iterations: usize,
        verbose: bool,
    ) -> Result<String> {
        if verbose {
            println!("   ♻️ 激活ReAct Agent模式，最大迭代次数: {}", max_iterations);
        }

        match agent.multi_turn(user_prompt, max_iterations).await {
            Ok(response) => {
                if verbose {
                    println!("   ✅ ReAct Agent任务完成");
                }
                Ok(response)
            }
            Err(PromptError::MaxDepthError {
                max_depth,
                chat_history,
                prompt: _,
            }) => {
                if verbose {
                    println!("   ⚠️ 达到最大迭代次数 ({})，使用部分结果", max_depth);
                }

                let partial = Self::extract_partial_result(&chat_history);
                if partial.is_empty() {
                    Err(anyhow::anyhow!(
                        "ReAct Agent因达到最大迭代次数({})而未完成任务",
                        max_depth
                    ))
                } else {
                    Ok(partial)
                }
            }
            Err(e) => {
                if verbose {
                    println!("   ❌ ReAct Agent出错: {:?}", e);
                }
                Err(anyhow::anyhow!("ReAct Agent任务执行失败: {}", e))
            }
        }
    }

    /// 从聊天历史中提取最后的助手文本作为部分结果
    fn extract_partial_result(chat_history: &[Message]) -> String {
        chat_history
            .iter()
            .rev()
            .find_map(|msg| {
                if let Message::Assistant { content, .. } = msg {
                    let text_content = content
                        .iter()
                        .filter_map(|c| {
                            if let AssistantContent::Text(text) = c {
                                Some(text.text.clone())
                            } else {
                                None
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n");

                    if !text_content.is_empty() {
                        Some(text_content)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or_default()
    }
}
