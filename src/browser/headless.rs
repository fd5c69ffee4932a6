use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::PageDriver;

/// 每个会话使用独立的用户数据目录，避免并发启动时互相锁定
static SESSION_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// 启动浏览器所需的参数
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub navigation_timeout: std::time::Duration,
    pub element_timeout: std::time::Duration,
}

impl LaunchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
            navigation_timeout: config.navigation_timeout(),
            element_timeout: config.element_timeout(),
        }
    }
}

/// 一次浏览器会话
///
/// 每个正在处理的条目各自持有一个会话，处理结束后调用 [`BrowserSession::close`]。
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    profile_dir: PathBuf,
    options: LaunchOptions,
}

impl BrowserSession {
    /// 启动浏览器
    pub async fn launch(options: &LaunchOptions) -> Result<Self, BrowserError> {
        let profile_dir = std::env::temp_dir().join(format!(
            "kobo_scraper-{}-{}",
            std::process::id(),
            SESSION_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        Self::launch_in(options, profile_dir).await
    }

    /// 使用指定的用户数据目录启动浏览器，启动失败时删除该目录
    pub(crate) async fn launch_in(
        options: &LaunchOptions,
        profile_dir: PathBuf,
    ) -> Result<Self, BrowserError> {
        match Self::start(options, &profile_dir).await {
            Ok((browser, handler_task)) => Ok(Self {
                browser,
                handler_task,
                profile_dir,
                options: options.clone(),
            }),
            Err(e) => {
                remove_profile_dir(&profile_dir).await;
                Err(e)
            }
        }
    }

    async fn start(
        options: &LaunchOptions,
        profile_dir: &Path,
    ) -> Result<(Browser, JoinHandle<()>), BrowserError> {
        debug!(
            "🚀 启动浏览器 (headless: {}, profile: {})",
            options.headless,
            profile_dir.display()
        );

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir)
            .window_size(1920, 1080)
            .args(vec![
                "--disable-gpu",
                "--no-sandbox",
                "--disable-dev-shm-usage",
            ]);

        builder = if options.headless {
            builder.new_headless_mode()
        } else {
            builder.with_head()
        };

        if let Some(executable) = &options.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        let config = builder.build().map_err(BrowserError::ConfigurationFailed)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|source| BrowserError::LaunchFailed { source })?;

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("浏览器事件处理出错: {}", e);
                }
            }
        });

        Ok((browser, handler_task))
    }

    /// 打开一个新的空白页面并设置 User-Agent
    pub async fn new_page(&self, user_agent: &str) -> Result<PageDriver, BrowserError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|source| BrowserError::PageCreationFailed { source })?;

        page.set_user_agent(user_agent)
            .await
            .map_err(|source| BrowserError::InteractionFailed {
                action: "set_user_agent",
                source,
            })?;

        Ok(PageDriver::new(
            page,
            self.options.navigation_timeout,
            self.options.element_timeout,
        ))
    }

    /// 关闭浏览器
    ///
    /// 关闭过程中的错误只记录日志，不影响条目的处理结果。
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        self.handler_task.abort();

        remove_profile_dir(&self.profile_dir).await;
    }
}

async fn remove_profile_dir(profile_dir: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(profile_dir).await {
        debug!("清理浏览器数据目录失败 {}: {}", profile_dir.display(), e);
    }
}
