use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("浏览器配置失败: {0}")]
    ConfigurationFailed(String),
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 页面加载超时
    #[error("页面加载超时 ({secs}秒): {url}")]
    NavigationTimeout { url: String, secs: u64 },
    /// 等待元素超时
    #[error("等待元素超时 ({secs}秒): {selector}")]
    SelectorTimeout { selector: String, secs: u64 },
    /// 页面交互失败（点击、输入、读取内容等）
    #[error("页面操作 {action} 失败: {source}")]
    InteractionFailed {
        action: &'static str,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// 单个条目的抓取错误
///
/// 每个 ISBN / URL 的失败都会被捕获为该类型并记录在结果中。
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
    /// 页面中缺少必需的元素
    #[error("缺少元素 {field} (选择器: {selector})")]
    MissingElement {
        field: &'static str,
        selector: String,
    },
    /// CSS 选择器无法解析
    #[error("无效的选择器: {0}")]
    InvalidSelector(String),
    /// 搜索后没有拿到页面地址
    #[error("搜索 ISBN {isbn} 后未获取到页面地址")]
    EmptyUrl { isbn: String },
    /// 其他解析错误
    #[error("解析失败: {0}")]
    Parse(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件读写失败
    #[error("文件读写失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// CSV 读写失败
    #[error("CSV 处理失败 ({}): {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// TOML 解析失败
    #[error("TOML 解析失败 ({}): {source}", .path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// CSV 缺少所需的列
    #[error("文件 {} 缺少列: {column}", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 批次大小必须大于 0
    #[error("批次大小必须大于 0")]
    InvalidBatchSize,
    /// 批次间隔必须是非负有限数
    #[error("批次间隔无效: {0}")]
    InvalidDelay(f64),
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
}

// ========== 便捷构造函数 ==========

impl FileError {
    /// 创建文件读写错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建 CSV 错误
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        FileError::Csv {
            path: path.into(),
            source,
        }
    }
}

impl ScrapeError {
    /// 创建缺少元素错误
    pub fn missing(field: &'static str, selector: impl Into<String>) -> Self {
        ScrapeError::MissingElement {
            field,
            selector: selector.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_error_wraps_browser_error_transparently() {
        let err: ScrapeError = BrowserError::SelectorTimeout {
            selector: "#search".to_string(),
            secs: 60,
        }
        .into();
        assert_eq!(err.to_string(), "等待元素超时 (60秒): #search");
    }

    #[test]
    fn test_app_error_prefixes_category() {
        let err: AppError = ConfigError::InvalidBatchSize.into();
        assert_eq!(err.to_string(), "配置错误: 批次大小必须大于 0");
    }

    #[test]
    fn test_missing_element_message() {
        let err = ScrapeError::missing("book_title", "h1.title");
        assert_eq!(err.to_string(), "缺少元素 book_title (选择器: h1.title)");
    }
}
