//! 调研进度反馈 - 心跳提示与阶段耗时统计

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::researcher::trace::SessionTrace;

/// 默认的心跳提示时间点（秒）
const HEARTBEAT_INTERVALS: [u64; 4] = [10, 25, 40, 60];

/// 检索提示的触发时间点（秒）
const SEARCH_REMINDER_AFTER: u64 = 15;

/// 进度报告器 - 调研执行期间在后台定时输出心跳提示
pub struct ProgressReporter {
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// 启动后台心跳任务
    pub fn start(trace: Arc<SessionTrace>) -> Self {
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let mut pending: Vec<u64> = HEARTBEAT_INTERVALS.to_vec();
            let mut search_reminder_shown = false;

            loop {
                tokio::time::sleep(Duration::from_millis(500)).await;
                let elapsed = start.elapsed().as_secs();

                pending.retain(|interval| {
                    if elapsed > *interval {
                        println!("\n⏳ 仍在调研中...（已超过 {} 秒）", interval);
                        false
                    } else {
                        true
                    }
                });

                // query已生成但检索尚未返回时，提示用户正在联网检索
                if !search_reminder_shown
                    && elapsed > SEARCH_REMINDER_AFTER
                    && !trace.planned_queries().is_empty()
                    && trace.last_bundle().is_none()
                {
                    println!("\n🔍 Agent正在联网检索公司信息...");
                    search_reminder_shown = true;
                }

                if pending.is_empty() {
                    break;
                }
            }
        });

        Self { handle }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 阶段计时器 - 记录各阶段耗时并生成报告
pub struct PhaseTimer {
    start_time: Instant,
    phase_start_times: HashMap<String, Instant>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        if let Some(start_time) = self.phase_start_times.remove(phase_name) {
            let duration = start_time.elapsed();
            self.phase_durations
                .push((phase_name.to_string(), duration));
            Some(duration)
        } else {
            None
        }
    }

    /// 获取总执行时间
    pub fn total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.1}秒\n",
            self.total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.2}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 阶段名称常量
pub struct PhaseKeys;

impl PhaseKeys {
    pub const RESEARCH: &'static str = "research";
    pub const COMPOSE: &'static str = "compose";
    pub const OUTPUT: &'static str = "output";
}
