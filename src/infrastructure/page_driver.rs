//! 页面驱动 - 基础设施层
//!
//! 持有 page 资源，只暴露"加载、查询、点击、输入、读取"的能力

use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::Page;
use tokio::time::{sleep, timeout, Instant};
use tracing::debug;

use crate::error::BrowserError;

/// 查询元素时的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 页面驱动
///
/// 职责：
/// - 持有 Page 资源
/// - 所有等待操作都带超时
/// - 不认识 ISBN / 图书
pub struct PageDriver {
    page: Page,
    navigation_timeout: Duration,
    element_timeout: Duration,
}

impl PageDriver {
    pub fn new(page: Page, navigation_timeout: Duration, element_timeout: Duration) -> Self {
        Self {
            page,
            navigation_timeout,
            element_timeout,
        }
    }

    /// 导航到指定地址
    pub async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        debug!("导航到: {}", url);
        match timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(source)) => Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                source,
            }),
            Err(_) => Err(BrowserError::NavigationTimeout {
                url: url.to_string(),
                secs: self.navigation_timeout.as_secs(),
            }),
        }
    }

    /// 等待元素出现
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        wait: Duration,
    ) -> Result<Element, BrowserError> {
        let deadline = Instant::now() + wait;
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) if Instant::now() < deadline => {
                    debug!("元素 {} 尚未出现: {}", selector, e);
                    sleep(POLL_INTERVAL).await;
                }
                Err(_) => {
                    return Err(BrowserError::SelectorTimeout {
                        selector: selector.to_string(),
                        secs: wait.as_secs(),
                    })
                }
            }
        }
    }

    /// 等待元素出现后点击
    pub async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let element = self.wait_for_selector(selector, self.element_timeout).await?;
        element
            .click()
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "click",
                source,
            })?;
        Ok(())
    }

    /// 如果元素已经存在则点击，不等待
    pub async fn click_if_present(&self, selector: &str) -> Result<(), BrowserError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "find_element",
                source,
            })?;
        element
            .click()
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "click",
                source,
            })?;
        Ok(())
    }

    /// 点击元素获得焦点后输入文本
    pub async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        let element = self.wait_for_selector(selector, self.element_timeout).await?;
        element
            .click()
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "focus",
                source,
            })?
            .type_str(text)
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "type",
                source,
            })?;
        Ok(())
    }

    /// 当前页面地址
    pub async fn current_url(&self) -> Result<Option<String>, BrowserError> {
        self.page
            .url()
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "url",
                source,
            })
    }

    /// 等待页面地址离开 `from`，超时后返回当时的地址
    pub async fn wait_for_url_change(&self, from: &str) -> Result<Option<String>, BrowserError> {
        let deadline = Instant::now() + self.navigation_timeout;
        loop {
            let current = self.current_url().await?;
            let changed = current.as_deref().is_some_and(|url| url != from);
            if changed || Instant::now() >= deadline {
                return Ok(current);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// 当前页面的完整 HTML
    pub async fn content(&self) -> Result<String, BrowserError> {
        self.page
            .content()
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "content",
                source,
            })
    }
}
