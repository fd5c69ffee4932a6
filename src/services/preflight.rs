//! 预检服务：开始抓取前确认站点可访问

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::browser::random_user_agent;

const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(30);

/// 请求站点首页并返回状态码
pub async fn check_status(base_url: &str) -> Result<StatusCode, reqwest::Error> {
    let client = reqwest::Client::builder()
        .user_agent(random_user_agent())
        .timeout(PREFLIGHT_TIMEOUT)
        .build()?;
    let response = client.get(base_url).send().await?;
    Ok(response.status())
}

/// 预检站点，结果只记录日志
pub async fn preflight(base_url: &str) {
    match check_status(base_url).await {
        Ok(status) if status.is_success() => info!("🌐 站点可访问: {} ({})", base_url, status),
        Ok(status) => warn!("⚠️ 站点返回非成功状态: {} ({})", base_url, status),
        Err(e) => warn!("⚠️ 站点预检失败 {}: {}", base_url, e),
    }
}
