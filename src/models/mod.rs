pub mod book;
pub mod isbn;
pub mod loaders;
pub mod selectors;

pub use book::{BookRecord, UrlRecord, NOT_AVAILABLE};
pub use isbn::{InvalidIsbn, Isbn};
pub use loaders::{load_book_urls, load_isbns, load_selectors};
pub use selectors::Selectors;
