pub mod csv_loader;
pub mod toml_loader;

pub use csv_loader::{load_book_urls, load_isbns};
pub use toml_loader::load_selectors;
