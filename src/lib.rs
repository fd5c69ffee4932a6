//! # Kobo Scraper
//!
//! 根据 ISBN 列表抓取 Kobo 书店图书信息的自动化工具
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Browser / Infrastructure）
//! - `browser/` - 启动与关闭浏览器会话，随机 User-Agent
//! - `PageDriver` - 持有 page，提供加载、查询、点击、输入、读取能力
//!
//! ### ② 业务能力层（Services）
//! - `IsbnSearch` - 用一个 ISBN 搜索详情页地址
//! - `BookInfo` - 打开一个详情页并提取图书信息
//! - `book_parser` - 纯函数的 HTML 解析
//! - `DatasetWriter` - 写 CSV 数据集
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_runner` - 分批并发、批间停顿、逐条记录结果
//! - `orchestrator/pipeline` - 两个阶段的输入输出与统计
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ScrapeError};
pub use models::{BookRecord, Isbn, Selectors, UrlRecord};
pub use orchestrator::{run_batches, App, BatchOptions, BatchReport, ItemOutcome, Phase};
