use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::error::FileError;
use crate::models::book::UrlRecord;
use crate::models::isbn::Isbn;

/// ISBN 输入文件中的列名
pub const ISBN_COLUMN: &str = "isbn13";

/// 从 CSV 文件读取 ISBN 列表
///
/// 无法解析的行会被记录并跳过，其余行保持原有顺序。
pub async fn load_isbns(path: &Path) -> Result<Vec<Isbn>, FileError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::io(path, e))?;
    let isbns = parse_isbns(&content, path)?;
    info!("✓ 从 {} 读取到 {} 个 ISBN", path.display(), isbns.len());
    Ok(isbns)
}

fn parse_isbns(content: &str, path: &Path) -> Result<Vec<Isbn>, FileError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers().map_err(|e| FileError::csv(path, e))?;
    let column = headers
        .iter()
        .position(|h| h.trim() == ISBN_COLUMN)
        .ok_or_else(|| FileError::MissingColumn {
            path: path.to_path_buf(),
            column: ISBN_COLUMN.to_string(),
        })?;

    let mut isbns = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| FileError::csv(path, e))?;
        let raw = record.get(column).unwrap_or_default();
        match raw.parse::<Isbn>() {
            Ok(isbn) => isbns.push(isbn),
            Err(e) => warn!("⚠️ 跳过第 {} 行: {}", row + 2, e),
        }
    }
    Ok(isbns)
}

/// 从第一阶段的输出中读取成功找到的详情页地址
pub async fn load_book_urls(path: &Path) -> Result<Vec<String>, FileError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::io(path, e))?;

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut urls = Vec::new();
    let mut skipped = 0;
    for record in reader.deserialize::<UrlRecord>() {
        let record = record.map_err(|e| FileError::csv(path, e))?;
        match record.url.filter(|u| !u.trim().is_empty()) {
            Some(url) => urls.push(url),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("⚠️ {} 个 ISBN 在第一阶段没有找到地址，已跳过", skipped);
    }
    info!("✓ 从 {} 读取到 {} 个详情页地址", path.display(), urls.len());
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_parse_isbns_keeps_order_and_skips_invalid_rows() {
        let csv = "title,isbn13\nA,9781402894626\nB,not-an-isbn\nC,978-0-306-40615-7\n";
        let isbns = parse_isbns(csv, Path::new("input.csv")).unwrap();
        let values: Vec<&str> = isbns.iter().map(Isbn::as_str).collect();
        assert_eq!(values, vec!["9781402894626", "9780306406157"]);
    }

    #[test]
    fn test_parse_isbns_requires_column() {
        let err = parse_isbns("isbn\n9781402894626\n", Path::new("input.csv")).unwrap_err();
        assert!(matches!(err, FileError::MissingColumn { column, .. } if column == "isbn13"));
    }

    #[tokio::test]
    async fn test_load_book_urls_skips_failed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.csv");
        std::fs::write(
            &path,
            "isbn,url,error\n\
             9781402894626,https://www.kobo.com/us/en/ebook/a,\n\
             9780306406157,,timeout\n\
             9780000000002,https://www.kobo.com/us/en/ebook/b,\n",
        )
        .unwrap();

        let urls = assert_ok!(load_book_urls(&path).await);
        assert_eq!(
            urls,
            vec![
                "https://www.kobo.com/us/en/ebook/a".to_string(),
                "https://www.kobo.com/us/en/ebook/b".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_isbns_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = assert_err!(load_isbns(&dir.path().join("missing.csv")).await);
        assert!(matches!(err, FileError::Io { .. }));
    }
}
