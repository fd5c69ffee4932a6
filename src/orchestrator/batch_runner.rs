//! 批量执行器 - 编排层
//!
//! ## 职责
//!
//! 把任意"单个条目"的异步处理函数应用到整份列表上：
//!
//! 1. **分批**：按 `batch_size` 把输入切成连续的批次，最后一批可以更小
//! 2. **批内并发**：同一批的条目一起轮询，等全部完成（成功或失败）才进入下一批
//! 3. **批间停顿**：两批之间等待 `delay`，最后一批之后不再等待
//! 4. **错误隔离**：每个条目的失败都单独记录，不会中断本批或整个运行
//! 5. **顺序保证**：输出顺序与输入顺序一致
//!
//! 同一批内的条目在当前任务中协作式并发执行（`join_all`），不会为每个条目启动线程。

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{error, info};

use crate::config::Config;
use crate::utils::logging;

/// 分批参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// 每批的条目数，至少为 1
    pub batch_size: usize,
    /// 批次之间的停顿
    pub delay: Duration,
}

impl BatchOptions {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.batches, config.delay())
    }

    /// 给定条目数时的批次数
    pub fn batch_count(&self, total: usize) -> usize {
        total.div_ceil(self.batch_size)
    }
}

/// 单个条目的处理结果
#[derive(Debug)]
pub struct ItemOutcome<T, R, E> {
    pub item: T,
    pub result: Result<R, E>,
}

impl<T, R, E> ItemOutcome<T, R, E> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// 全部批次的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub batches: usize,
}

impl BatchReport {
    pub fn from_outcomes<T, R, E>(outcomes: &[ItemOutcome<T, R, E>], batches: usize) -> Self {
        let success = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            total: outcomes.len(),
            success,
            failed: outcomes.len() - success,
            batches,
        }
    }
}

/// 分批执行 `handler`
///
/// 返回与 `items` 等长、同序的结果列表。
pub async fn run_batches<T, R, E, F, Fut>(
    items: Vec<T>,
    options: BatchOptions,
    handler: F,
) -> Vec<ItemOutcome<T, R, E>>
where
    T: Clone + Display,
    E: Display,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let total = items.len();
    let total_batches = options.batch_count(total);
    let mut outcomes = Vec::with_capacity(total);

    for (batch_index, batch) in items.chunks(options.batch_size).enumerate() {
        let batch_num = batch_index + 1;
        let batch_start = batch_index * options.batch_size;
        logging::log_batch_start(
            batch_num,
            total_batches,
            batch_start + 1,
            batch_start + batch.len(),
            total,
        );

        // 本批所有条目一起执行，等待全部完成
        let results = join_all(batch.iter().cloned().map(&handler)).await;

        let mut success = 0;
        for (item, result) in batch.iter().cloned().zip(results) {
            match &result {
                Ok(_) => success += 1,
                Err(e) => error!("[{}] ❌ 处理失败: {}", item, e),
            }
            outcomes.push(ItemOutcome { item, result });
        }

        logging::log_batch_complete(batch_num, success, batch.len());

        // 最后一批之后不再停顿
        if batch_num < total_batches && !options.delay.is_zero() {
            info!("⏳ 等待 {:.1} 秒后开始下一批", options.delay.as_secs_f64());
            sleep(options.delay).await;
        }
    }

    outcomes
}
