pub mod headless;
pub mod user_agent;

pub use headless::{BrowserSession, LaunchOptions};
pub use user_agent::random_user_agent;
