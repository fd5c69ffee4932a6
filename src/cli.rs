use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::orchestrator::Phase;

#[derive(Parser, Debug)]
#[command(name = "kobo_scraper")]
#[command(about = "根据 ISBN 列表分批抓取 Kobo 图书信息", long_about = None)]
pub struct Cli {
    /// 每批同时处理的请求数量
    #[arg(short, long, global = true)]
    pub batches: Option<usize>,

    /// 批次之间的间隔（秒）
    #[arg(short, long, global = true)]
    pub delay: Option<f64>,

    /// 显示浏览器窗口（默认无头模式）
    #[arg(long, global = true)]
    pub headed: bool,

    /// ISBN 输入文件
    #[arg(long, global = true)]
    pub isbn_csv: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// 只搜索 ISBN 对应的详情页地址
    Urls,
    /// 只抓取已有地址的图书信息
    Details,
    /// 依次运行两个阶段（默认）
    All,
}

impl Cli {
    /// 要运行的阶段
    pub fn phase(&self) -> Phase {
        match self.command.unwrap_or(Commands::All) {
            Commands::Urls => Phase::Urls,
            Commands::Details => Phase::Details,
            Commands::All => Phase::All,
        }
    }

    /// 用命令行参数覆盖配置
    pub fn apply(&self, config: &mut Config) {
        if let Some(batches) = self.batches {
            config.batches = batches;
        }
        if let Some(delay) = self.delay {
            config.delay_secs = delay;
        }
        if self.headed {
            config.headless = false;
        }
        if let Some(path) = &self.isbn_csv {
            config.isbn_csv = path.clone();
        }
    }

    /// 日志文件与本次运行的第一个阶段的数据集放在一起
    pub fn log_path(&self, config: &Config) -> PathBuf {
        let dataset = match self.phase() {
            Phase::Details => config.book_dataset_path(),
            Phase::Urls | Phase::All => config.url_dataset_path(),
        };
        dataset.with_extension("log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_all_phases() {
        let cli = Cli::parse_from(["kobo_scraper"]);
        assert_eq!(cli.phase(), Phase::All);
        assert!(!cli.headed);
    }

    #[test]
    fn test_global_flags_override_config() {
        let cli = Cli::parse_from(["kobo_scraper", "urls", "--batches", "4", "-d", "0.5", "--headed"]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(cli.phase(), Phase::Urls);
        assert_eq!(config.batches, 4);
        assert_eq!(config.delay_secs, 0.5);
        assert!(!config.headless);
    }

    #[test]
    fn test_log_path_follows_phase() {
        let config = Config::default();
        let details = Cli::parse_from(["kobo_scraper", "details"]);
        assert_eq!(
            details.log_path(&config),
            PathBuf::from("isbn13 datasets").join("isbn13 book datasets.log")
        );
        let all = Cli::parse_from(["kobo_scraper"]);
        assert_eq!(
            all.log_path(&config),
            PathBuf::from("dynamic url datasets").join("isbn13 url datasets.log")
        );
    }
}
