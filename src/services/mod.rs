pub mod book_info;
pub mod book_parser;
pub mod dataset_writer;
pub mod isbn_search;
pub mod preflight;

pub use book_info::BookInfo;
pub use book_parser::parse_book_page;
pub use dataset_writer::DatasetWriter;
pub use isbn_search::IsbnSearch;
pub use preflight::preflight;
