//! 两阶段抓取流程 - 编排层
//!
//! ## 职责
//!
//! 1. **第一阶段**：读取 ISBN 列表，分批搜索详情页地址，写出地址数据集
//! 2. **第二阶段**：读取地址数据集，分批提取图书信息，写出图书数据集
//! 3. **阶段衔接**：第一阶段失败的 ISBN 保留在地址数据集中，但不会进入第二阶段
//!
//! 单个条目的处理交给 `services`，分批交给 [`run_batches`]。

use std::fmt::Display;
use std::future::Future;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{self, BookRecord, Isbn, Selectors, UrlRecord};
use crate::orchestrator::batch_runner::{run_batches, BatchOptions, BatchReport};
use crate::services::book_info::current_timestamp;
use crate::services::{preflight, BookInfo, DatasetWriter, IsbnSearch};
use crate::utils::logging;

const URL_PHASE: &str = "ISBN 搜索";
const BOOK_PHASE: &str = "图书信息抓取";

/// 要运行的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 只运行第一阶段
    Urls,
    /// 只运行第二阶段（需要第一阶段的输出）
    Details,
    /// 依次运行两个阶段
    All,
}

/// 应用主结构
pub struct App {
    config: Config,
    selectors: Selectors,
}

impl App {
    /// 初始化应用：校验配置并加载选择器
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        logging::log_startup(config.batches, config.delay(), config.headless);

        let selectors = models::load_selectors(&config.selectors_file).await?;
        Ok(Self { config, selectors })
    }

    /// 运行指定阶段
    pub async fn run(&self, phase: Phase) -> AppResult<()> {
        match phase {
            Phase::Urls => {
                self.isbn_automation().await?;
            }
            Phase::Details => {
                self.book_info_automation().await?;
            }
            Phase::All => {
                self.isbn_automation().await?;
                info!("✓ 地址搜索完成，即将开始抓取图书信息");
                sleep(self.config.phase_pause()).await;
                self.book_info_automation().await?;
            }
        }
        Ok(())
    }

    /// 第一阶段：ISBN → 详情页地址
    pub async fn isbn_automation(&self) -> AppResult<BatchReport> {
        let isbns = models::load_isbns(&self.config.isbn_csv).await?;
        let writer = DatasetWriter::new(self.config.url_dataset_path());
        writer.ensure_dir().await?;

        if isbns.is_empty() {
            warn!("⚠️ 没有找到待处理的 ISBN");
        } else {
            preflight(&self.config.base_url).await;
        }

        logging::log_phase_start(URL_PHASE, isbns.len(), self.config.batches);
        let search = IsbnSearch::new(&self.config, self.selectors.clone());
        let options = BatchOptions::from_config(&self.config);
        let (records, report) =
            discover_urls(isbns, options, |isbn| search.find_url(isbn)).await;

        writer.write(&records).await?;
        logging::print_phase_stats(URL_PHASE, &report, writer.path());
        Ok(report)
    }

    /// 第二阶段：详情页地址 → 图书信息
    pub async fn book_info_automation(&self) -> AppResult<BatchReport> {
        let urls = models::load_book_urls(&self.config.url_dataset_path()).await?;
        let writer = DatasetWriter::new(self.config.book_dataset_path());
        writer.ensure_dir().await?;

        if urls.is_empty() {
            warn!("⚠️ 没有找到待处理的详情页地址");
        }

        logging::log_phase_start(BOOK_PHASE, urls.len(), self.config.batches);
        let book_info = BookInfo::new(&self.config, self.selectors.clone());
        let options = BatchOptions::from_config(&self.config);
        let (records, report) =
            extract_details(urls, options, |url| book_info.fetch(url)).await;

        writer.write(&records).await?;
        logging::print_phase_stats(BOOK_PHASE, &report, writer.path());
        Ok(report)
    }
}

/// 分批搜索 ISBN，把每个结果转换为 [`UrlRecord`]
pub async fn discover_urls<F, Fut, E>(
    isbns: Vec<Isbn>,
    options: BatchOptions,
    handler: F,
) -> (Vec<UrlRecord>, BatchReport)
where
    F: Fn(Isbn) -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: Display,
{
    let batches = options.batch_count(isbns.len());
    let outcomes = run_batches(isbns, options, handler).await;
    let report = BatchReport::from_outcomes(&outcomes, batches);

    let records = outcomes
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(url) => UrlRecord::found(outcome.item.as_str(), url),
            Err(e) => UrlRecord::failed(outcome.item.as_str(), e),
        })
        .collect();
    (records, report)
}

/// 分批抓取详情页，把每个结果转换为 [`BookRecord`]
pub async fn extract_details<F, Fut, E>(
    urls: Vec<String>,
    options: BatchOptions,
    handler: F,
) -> (Vec<BookRecord>, BatchReport)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<BookRecord, E>>,
    E: Display,
{
    let batches = options.batch_count(urls.len());
    let outcomes = run_batches(urls, options, handler).await;
    let report = BatchReport::from_outcomes(&outcomes, batches);

    let records = outcomes
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(record) => record,
            Err(e) => BookRecord::failed(outcome.item, current_timestamp(), e),
        })
        .collect();
    (records, report)
}
