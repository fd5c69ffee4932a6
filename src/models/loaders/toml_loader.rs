use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::error::FileError;
use crate::models::selectors::Selectors;

/// 从 TOML 文件加载 CSS 选择器
///
/// 文件不存在时使用内置默认值；文件存在但格式错误时返回错误。
pub async fn load_selectors(path: &Path) -> Result<Selectors, FileError> {
    if !fs::try_exists(path)
        .await
        .map_err(|e| FileError::io(path, e))?
    {
        warn!("⚠️ 选择器文件不存在: {}，使用默认选择器", path.display());
        return Ok(Selectors::default());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::io(path, e))?;

    let selectors: Selectors = toml::from_str(&content).map_err(|e| FileError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("已加载选择器配置: {}", path.display());
    Ok(selectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let selectors = assert_ok!(load_selectors(&dir.path().join("nope.toml")).await);
        assert_eq!(selectors, Selectors::default());
    }

    #[tokio::test]
    async fn test_partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html_selectors.toml");
        std::fs::write(&path, "book_title = \"h1.book\"\nratings = \"#stars\"\n").unwrap();

        let selectors = assert_ok!(load_selectors(&path).await);
        assert_eq!(selectors.book_title, "h1.book");
        assert_eq!(selectors.ratings, "#stars");
        assert_eq!(selectors.synopsis, Selectors::default().synopsis);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html_selectors.toml");
        std::fs::write(&path, "book_title = [").unwrap();

        let err = assert_err!(load_selectors(&path).await);
        assert!(matches!(err, FileError::TomlParse { .. }));
    }
}
