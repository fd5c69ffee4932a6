use serde::{Deserialize, Serialize};

/// 缺失的可选字段使用的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 第一阶段结果：ISBN → 详情页地址
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub isbn: String,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl UrlRecord {
    pub fn found(isbn: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn failed(isbn: impl Into<String>, error: impl ToString) -> Self {
        Self {
            isbn: isbn.into(),
            url: None,
            error: Some(error.to_string()),
        }
    }
}

/// 第二阶段结果：详情页中的图书元数据
///
/// 字段顺序即导出 CSV 的列顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub region: String,
    pub retailer: String,
    pub asin: String,
    pub isbn13: String,
    pub title_name: String,
    pub authors: String,
    pub sales_rank: String,
    pub list_price: String,
    pub print_list_price: String,
    pub price: String,
    pub currency: String,
    pub timestamp: String,
    pub synopsis: String,
    pub imprint_i: String,
    pub release_date: String,
    pub imprint_ii: String,
    pub language: String,
    pub download_options: String,
    pub number_of_pages: String,
    pub hours_to_read: String,
    pub total_words: String,
    pub rating: String,
    pub category_rankings: String,
    pub image: String,
    pub url: String,
    pub error: Option<String>,
}

impl BookRecord {
    /// 带有零售商固定信息的空记录
    pub fn kobo_us(url: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            region: "US".to_string(),
            retailer: "Kobo US".to_string(),
            currency: "USD".to_string(),
            url: url.into(),
            timestamp: timestamp.into(),
            ..Default::default()
        }
    }

    /// 抓取失败的记录：只保留地址和错误信息
    pub fn failed(url: impl Into<String>, timestamp: impl Into<String>, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::kobo_us(url, timestamp)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
