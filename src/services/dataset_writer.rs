//! 数据集写入服务 - 业务能力层
//!
//! 只负责"把结果写成 CSV"，不关心结果从哪里来

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::error::FileError;

/// CSV 数据集写入服务
pub struct DatasetWriter {
    path: PathBuf,
}

impl DatasetWriter {
    /// 使用 CSV 文件路径创建
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 确保输出目录存在
    pub async fn ensure_dir(&self) -> Result<(), FileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileError::io(parent, e))?;
        }
        Ok(())
    }

    /// 写入全部记录（覆盖已有文件）
    pub async fn write<S: Serialize>(&self, records: &[S]) -> Result<(), FileError> {
        self.ensure_dir().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| FileError::csv(&self.path, e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| FileError::io(&self.path, e.into_error()))?;

        debug!("写入 {} 条记录到 {}", records.len(), self.path.display());
        fs::write(&self.path, bytes)
            .await
            .map_err(|e| FileError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrlRecord;

    #[tokio::test]
    async fn test_write_creates_directory_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dynamic url datasets").join("urls.csv");
        let writer = DatasetWriter::new(&path);

        writer
            .write(&[
                UrlRecord::found("9781402894626", "https://www.kobo.com/us/en/ebook/a"),
                UrlRecord::failed("9780306406157", "等待元素超时"),
            ])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "isbn,url,error");
        assert_eq!(lines[1], "9781402894626,https://www.kobo.com/us/en/ebook/a,");
        assert_eq!(lines[2], "9780306406157,,等待元素超时");
    }
}
