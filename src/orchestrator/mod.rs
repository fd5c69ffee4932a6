//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_runner` - 通用分批执行器
//! - 按批次大小切分输入
//! - 批内并发、批间停顿
//! - 逐条记录成功或失败，保持输入顺序
//!
//! ### `pipeline` - 两阶段抓取流程
//! - 读取输入、调用分批执行器、写出数据集
//! - 输出每个阶段的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (App: ISBN 搜索 → 图书信息抓取)
//!     ↓
//! batch_runner (处理 Vec<WorkItem>)
//!     ↓
//! services (能力层：isbn_search / book_info / dataset_writer)
//!     ↓
//! browser + infrastructure (浏览器会话与 PageDriver)
//! ```

pub mod batch_runner;
pub mod pipeline;

// 重新导出主要类型
pub use batch_runner::{run_batches, BatchOptions, BatchReport, ItemOutcome};
pub use pipeline::{discover_urls, extract_details, App, Phase};
