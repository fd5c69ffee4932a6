use anyhow::Result;
use clap::Parser;
use tokio::time::Instant;

use kobo_scraper::cli::Cli;
use kobo_scraper::utils::logging;
use kobo_scraper::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置：环境变量 → 命令行参数
    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    // 初始化日志
    logging::init(&cli.log_path(&config))?;

    let started = Instant::now();

    // 初始化并运行应用
    App::initialize(config).await?.run(cli.phase()).await?;

    logging::print_elapsed(started.elapsed());
    Ok(())
}
