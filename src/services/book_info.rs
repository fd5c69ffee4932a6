//! 图书详情服务 - 业务能力层
//!
//! 只负责"打开一个详情页并提取元数据"，不关心分批

use std::time::Duration;

use tracing::info;

use crate::browser::{random_user_agent, BrowserSession, LaunchOptions};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::models::{BookRecord, Selectors};
use crate::services::book_parser::parse_book_page;
use crate::services::isbn_search::dismiss_popup;
use crate::utils::logging::truncate_text;

/// 记录中时间戳的格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 当前本地时间，按 [`TIMESTAMP_FORMAT`] 格式化
pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 图书详情服务
pub struct BookInfo {
    launch: LaunchOptions,
    selectors: Selectors,
    ratings_timeout: Duration,
}

impl BookInfo {
    pub fn new(config: &Config, selectors: Selectors) -> Self {
        Self {
            launch: LaunchOptions::from_config(config),
            selectors,
            ratings_timeout: config.ratings_timeout(),
        }
    }

    /// 打开详情页并提取图书信息
    pub async fn fetch(&self, url: String) -> Result<BookRecord, ScrapeError> {
        let timestamp = current_timestamp();
        let session = BrowserSession::launch(&self.launch).await?;
        let result = self.extract(&session, &url, &timestamp).await;
        session.close().await;
        result
    }

    async fn extract(
        &self,
        session: &BrowserSession,
        url: &str,
        timestamp: &str,
    ) -> Result<BookRecord, ScrapeError> {
        let page = session.new_page(random_user_agent()).await?;
        page.goto(url).await?;
        dismiss_popup(&page, &self.selectors.close_button, url).await;

        // 评分元素渲染较慢，出现后再读取整页内容
        page.wait_for_selector(&self.selectors.ratings, self.ratings_timeout)
            .await?;
        let html = page.content().await?;

        let record = parse_book_page(&html, url, &self.selectors, timestamp)?;
        info!("正在处理图书: {}", truncate_text(&record.title_name, 60));
        Ok(record)
    }
}
