use serde::{Deserialize, Serialize};

/// 页面元素的 CSS 选择器
///
/// 可以通过 `html_selectors.toml` 覆盖，缺失的键使用默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// 首页弹窗的关闭按钮
    pub close_button: String,
    /// 搜索框
    pub search_box: String,
    /// 搜索提交按钮
    pub submit_button: String,
    /// 评分元素（读取 aria-label），详情页渲染完成的标志
    pub ratings: String,
    pub book_title: String,
    /// 出版信息列表：出版社、发行日期、品牌、ISBN、语言、下载格式
    pub book_details: String,
    /// 页数、阅读时长、字数
    pub about_this_book: String,
    pub authors: String,
    pub was_price: String,
    pub is_price: String,
    pub synopsis: String,
    pub category_rankings: String,
    pub img_url: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            close_button: "button.close-modal".to_string(),
            search_box: "input[name=\"query\"]".to_string(),
            submit_button: "button.search-submit".to_string(),
            ratings: ".rating-average[aria-label]".to_string(),
            book_title: "h1.title.product-field".to_string(),
            book_details: ".bookitem-secondary-metadata ul li".to_string(),
            about_this_book: ".stat-desc strong".to_string(),
            authors: ".contributor-name".to_string(),
            was_price: ".pricing-details .was-price".to_string(),
            is_price: ".pricing-details .active-price .price".to_string(),
            synopsis: ".synopsis-description".to_string(),
            category_rankings: ".category-rankings".to_string(),
            img_url: "img.cover-image".to_string(),
        }
    }
}
