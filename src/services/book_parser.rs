//! 详情页解析 - 业务能力层
//!
//! 只负责把详情页 HTML 解析为 [`BookRecord`]，不接触浏览器

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ScrapeError;
use crate::models::{BookRecord, Selectors, NOT_AVAILABLE};

/// 解析详情页
///
/// 标题、作者、简介、出版信息、评分、分类排名和封面为必需元素，缺失时整条记录失败；
/// 价格与"关于本书"中的统计信息缺失时填 `N/A`。
pub fn parse_book_page(
    html: &str,
    url: &str,
    selectors: &Selectors,
    timestamp: &str,
) -> Result<BookRecord, ScrapeError> {
    let doc = Html::parse_document(html);

    let title_name = element_text(required(&doc, "book_title", &selectors.book_title)?);
    let authors = element_text(required(&doc, "authors", &selectors.authors)?);
    let synopsis = element_text(required(&doc, "synopsis", &selectors.synopsis)?);

    let details = all_texts(&doc, &selectors.book_details)?;
    let detail = |index: usize, prefix: &str| -> Result<String, ScrapeError> {
        details
            .get(index)
            .map(|text| strip_label(text, prefix))
            .ok_or_else(|| {
                ScrapeError::missing(
                    "book_details",
                    format!("{} (第 {} 项)", selectors.book_details, index + 1),
                )
            })
    };

    let about = all_texts(&doc, &selectors.about_this_book)?;
    let about_item = |index: usize| {
        about
            .get(index)
            .cloned()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    let rating = required(&doc, "ratings", &selectors.ratings)?
        .value()
        .attr("aria-label")
        .map(str::trim)
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    let category_rankings = collapse_whitespace(&element_text(required(
        &doc,
        "category_rankings",
        &selectors.category_rankings,
    )?))?;

    let image = required(&doc, "img_url", &selectors.img_url)?
        .value()
        .attr("src")
        .map(|src| resolve_url(url, src))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Ok(BookRecord {
        isbn13: detail(3, "ISBN:")?,
        title_name,
        authors,
        list_price: optional_text(&doc, &selectors.was_price)?,
        price: optional_text(&doc, &selectors.is_price)?,
        synopsis,
        imprint_i: detail(0, "")?,
        release_date: detail(1, "Release Date:")?,
        imprint_ii: detail(2, "Imprint:")?,
        language: detail(4, "Language:")?,
        download_options: detail(5, "Download options:")?,
        number_of_pages: about_item(0),
        hours_to_read: about_item(1),
        total_words: about_item(2),
        rating,
        category_rankings,
        image,
        ..BookRecord::kobo_us(url, timestamp)
    })
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector(selector.to_string()))
}

fn required<'a>(
    doc: &'a Html,
    field: &'static str,
    selector: &str,
) -> Result<ElementRef<'a>, ScrapeError> {
    doc.select(&parse_selector(selector)?)
        .next()
        .ok_or_else(|| ScrapeError::missing(field, selector))
}

fn optional_text(doc: &Html, selector: &str) -> Result<String, ScrapeError> {
    Ok(doc
        .select(&parse_selector(selector)?)
        .next()
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

fn all_texts(doc: &Html, selector: &str) -> Result<Vec<String>, ScrapeError> {
    Ok(doc
        .select(&parse_selector(selector)?)
        .map(element_text)
        .collect())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn strip_label(text: &str, prefix: &str) -> String {
    text.strip_prefix(prefix).unwrap_or(text).trim().to_string()
}

fn collapse_whitespace(text: &str) -> Result<String, ScrapeError> {
    let re = Regex::new(r"\s+").map_err(|e| ScrapeError::Parse(e.to_string()))?;
    Ok(re.replace_all(text.trim(), " ").into_owned())
}

fn resolve_url(base: &str, src: &str) -> String {
    Url::parse(base)
        .and_then(|base| base.join(src))
        .map(String::from)
        .unwrap_or_else(|_| src.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.kobo.com/us/en/ebook/the-hobbit-1";
    const TIMESTAMP: &str = "2024-05-01 12:00:00";

    const DETAIL_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<body>
    <img class="cover-image" src="/images/hobbit.jpg">
    <h1 class="title product-field"> The Hobbit </h1>
    <span class="contributor-name">J.R.R. Tolkien</span>
    <div class="rating-average" aria-label="Rated 4.7 out of 5 stars"></div>
    <div class="pricing-details">
        <span class="was-price">$14.99</span>
        <div class="active-price"><span class="price">$9.99</span></div>
    </div>
    <div class="synopsis-description">In a hole in the ground there lived a hobbit.</div>
    <div class="bookitem-secondary-metadata">
        <ul>
            <li>HarperCollins</li>
            <li>Release Date: September 18, 2012</li>
            <li>Imprint: Mariner Books</li>
            <li>ISBN: 9780547951973</li>
            <li>Language: English</li>
            <li>Download options: EPUB 3 (Adobe DRM)</li>
        </ul>
    </div>
    <div class="stat-desc"><strong>300</strong></div>
    <div class="stat-desc"><strong>6 - 7</strong></div>
    <div class="stat-desc"><strong>95000</strong></div>
    <div class="category-rankings">
        #1 in   Fantasy
        #3 in Classics
    </div>
</body>
</html>
"#;

    #[test]
    fn test_parse_full_detail_page() {
        let record = parse_book_page(DETAIL_PAGE, URL, &Selectors::default(), TIMESTAMP).unwrap();

        assert_eq!(record.title_name, "The Hobbit");
        assert_eq!(record.authors, "J.R.R. Tolkien");
        assert_eq!(record.isbn13, "9780547951973");
        assert_eq!(record.imprint_i, "HarperCollins");
        assert_eq!(record.release_date, "September 18, 2012");
        assert_eq!(record.imprint_ii, "Mariner Books");
        assert_eq!(record.language, "English");
        assert_eq!(record.download_options, "EPUB 3 (Adobe DRM)");
        assert_eq!(record.list_price, "$14.99");
        assert_eq!(record.price, "$9.99");
        assert_eq!(record.number_of_pages, "300");
        assert_eq!(record.hours_to_read, "6 - 7");
        assert_eq!(record.total_words, "95000");
        assert_eq!(record.rating, "Rated 4.7 out of 5 stars");
        assert_eq!(record.category_rankings, "#1 in Fantasy #3 in Classics");
        assert_eq!(record.image, "https://www.kobo.com/images/hobbit.jpg");
        assert_eq!(record.url, URL);
        assert_eq!(record.timestamp, TIMESTAMP);
        assert_eq!(record.retailer, "Kobo US");
        assert_eq!(record.currency, "USD");
        assert!(record.is_ok());
    }

    #[test]
    fn test_missing_optional_fields_become_not_available() {
        let html = DETAIL_PAGE
            .replace(r#"<span class="was-price">$14.99</span>"#, "")
            .replace(r#"<div class="stat-desc"><strong>95000</strong></div>"#, "");
        let record = parse_book_page(&html, URL, &Selectors::default(), TIMESTAMP).unwrap();

        assert_eq!(record.list_price, NOT_AVAILABLE);
        assert_eq!(record.price, "$9.99");
        assert_eq!(record.total_words, NOT_AVAILABLE);
        assert_eq!(record.hours_to_read, "6 - 7");
    }

    #[test]
    fn test_missing_title_fails() {
        let html = DETAIL_PAGE.replace("title product-field", "subtitle");
        let err = parse_book_page(&html, URL, &Selectors::default(), TIMESTAMP).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingElement {
                field: "book_title",
                ..
            }
        ));
    }

    #[test]
    fn test_short_details_list_fails() {
        let html = DETAIL_PAGE.replace("<li>Download options: EPUB 3 (Adobe DRM)</li>", "");
        let err = parse_book_page(&html, URL, &Selectors::default(), TIMESTAMP).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingElement {
                field: "book_details",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let selectors = Selectors {
            book_title: "h1[".to_string(),
            ..Selectors::default()
        };
        let err = parse_book_page(DETAIL_PAGE, URL, &selectors, TIMESTAMP).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidSelector(s) if s == "h1["));
    }

    #[test]
    fn test_resolve_url_keeps_absolute_src() {
        assert_eq!(
            resolve_url(URL, "https://cdn.kobo.com/a.jpg"),
            "https://cdn.kobo.com/a.jpg"
        );
        assert_eq!(resolve_url("not a url", "/a.jpg"), "/a.jpg");
    }
}
