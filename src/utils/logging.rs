//! 日志工具模块
//!
//! 初始化 tracing 订阅器，并提供批次/阶段日志的格式化输出

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::FileError;
use crate::orchestrator::BatchReport;

/// 初始化日志：同时输出到终端和日志文件
///
/// 日志级别默认为 `info`，可通过 `RUST_LOG` 覆盖。
pub fn init(log_file_path: &Path) -> Result<(), FileError> {
    init_log_file(log_file_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| FileError::io(log_file_path, e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .try_init();

    Ok(())
}

/// 初始化日志文件：创建目录并写入本次运行的抬头
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &Path) -> Result<(), FileError> {
    if let Some(parent) = log_file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }

    let log_header = format!(
        "{}\n抓取日志 - {}\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| FileError::io(log_file_path, e))?;
    file.write_all(log_header.as_bytes())
        .map_err(|e| FileError::io(log_file_path, e))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(batches: usize, delay: Duration, headless: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 分批并发抓取模式");
    info!("📊 每批并发数: {}", batches);
    info!("⏳ 批次间隔: {:.1} 秒", delay.as_secs_f64());
    info!("🖥️ 无头模式: {}", headless);
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始信息
///
/// # 参数
/// - `phase`: 阶段名称
/// - `total`: 条目总数
/// - `batches`: 每批条目数
pub fn log_phase_start(phase: &str, total: usize, batches: usize) {
    info!("\n{}", "=".repeat(60));
    info!("🔎 {}: 共 {} 个条目", phase, total);
    info!("📋 将以每批 {} 个的方式处理，请稍候...", batches);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始条目编号
/// - `end`: 结束条目编号
/// - `total`: 条目总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批条目: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
    info!("{}", "─".repeat(60));
}

/// 打印阶段统计信息
pub fn print_phase_stats(phase: &str, report: &BatchReport, output_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 {} 完成统计", phase);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📦 批次数: {}", report.batches);
    info!("✅ 成功: {}/{}", report.success, report.total);
    info!("❌ 失败: {}", report.failed);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path.display());
}

/// 打印总耗时
pub fn print_elapsed(elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    info!(
        "⏱️ 总耗时 {:.2} 秒 | {:.2} 分钟",
        secs,
        secs / 60.0
    );
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("The Great Gatsby", 9), "The Great...");
    }

    #[test]
    fn test_init_log_file_creates_directory_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.log");

        init_log_file(&path).unwrap();
        init_log_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("抓取日志").count(), 2);
    }
}
