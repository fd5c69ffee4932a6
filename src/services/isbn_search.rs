//! ISBN 搜索服务 - 业务能力层
//!
//! 只负责"用一个 ISBN 找到详情页地址"，不关心分批

use tracing::{info, warn};

use crate::browser::{random_user_agent, BrowserSession, LaunchOptions};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::infrastructure::PageDriver;
use crate::models::{Isbn, Selectors};

/// ISBN 搜索服务
///
/// 每次调用启动独立的浏览器会话，结束后关闭。
pub struct IsbnSearch {
    launch: LaunchOptions,
    selectors: Selectors,
    base_url: String,
}

impl IsbnSearch {
    pub fn new(config: &Config, selectors: Selectors) -> Self {
        Self {
            launch: LaunchOptions::from_config(config),
            selectors,
            base_url: config.base_url.clone(),
        }
    }

    /// 搜索 ISBN 并返回搜索后的页面地址
    pub async fn find_url(&self, isbn: Isbn) -> Result<String, ScrapeError> {
        let session = BrowserSession::launch(&self.launch).await?;
        let result = self.search(&session, &isbn).await;
        session.close().await;

        if let Ok(url) = &result {
            info!("[{}] ✓ {}", isbn, url);
        }
        result
    }

    async fn search(&self, session: &BrowserSession, isbn: &Isbn) -> Result<String, ScrapeError> {
        let page = session.new_page(random_user_agent()).await?;

        info!("[{}] 正在打开 Kobo 首页", isbn);
        page.goto(&self.base_url).await?;
        dismiss_popup(&page, &self.selectors.close_button, isbn.as_str()).await;

        let before = page
            .current_url()
            .await?
            .unwrap_or_else(|| self.base_url.clone());

        page.type_into(&self.selectors.search_box, isbn.as_str())
            .await?;
        page.click(&self.selectors.submit_button).await?;
        info!("[{}] 已提交搜索", isbn);

        page.wait_for_url_change(&before)
            .await?
            .filter(|url| !url.is_empty() && *url != before)
            .ok_or_else(|| ScrapeError::EmptyUrl {
                isbn: isbn.to_string(),
            })
    }
}

/// 尝试关闭页面弹窗，失败时只记录警告
pub(crate) async fn dismiss_popup(page: &PageDriver, selector: &str, label: &str) {
    match page.click_if_present(selector).await {
        Ok(()) => info!("[{}] 已关闭弹窗", label),
        Err(e) => warn!("[{}] 未找到弹窗关闭按钮或点击失败: {}", label, e),
    }
}
