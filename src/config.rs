use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 每批同时处理的请求数量（即同时打开的浏览器数量）
    pub batches: usize,
    /// 批次之间的间隔（秒）
    pub delay_secs: f64,
    /// 是否以无头模式运行浏览器
    pub headless: bool,
    /// 两个阶段之间的停顿（秒）
    pub phase_pause_secs: f64,
    /// 书店首页地址
    pub base_url: String,
    /// ISBN 输入文件（需包含 isbn13 列）
    pub isbn_csv: PathBuf,
    /// CSS 选择器配置文件
    pub selectors_file: PathBuf,
    /// 第一阶段输出目录与文件名（不含扩展名）
    pub url_dataset_dir: PathBuf,
    pub url_dataset_name: String,
    /// 第二阶段输出目录与文件名（不含扩展名）
    pub book_dataset_dir: PathBuf,
    pub book_dataset_name: String,
    /// 浏览器可执行文件路径，未设置时由 chromiumoxide 自动查找
    pub chrome_executable: Option<PathBuf>,
    // --- 超时配置（秒） ---
    pub navigation_timeout_secs: u64,
    pub element_timeout_secs: u64,
    pub ratings_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batches: 10,
            delay_secs: 2.0,
            headless: true,
            phase_pause_secs: 2.0,
            base_url: "https://www.kobo.com/us/en".to_string(),
            isbn_csv: PathBuf::from("ISBN13_Kobo - ISBN13_Kobo.csv"),
            selectors_file: PathBuf::from("html_selectors.toml"),
            url_dataset_dir: PathBuf::from("dynamic url datasets"),
            url_dataset_name: "isbn13 url datasets".to_string(),
            book_dataset_dir: PathBuf::from("isbn13 datasets"),
            book_dataset_name: "isbn13 book datasets".to_string(),
            chrome_executable: None,
            navigation_timeout_secs: 120,
            element_timeout_secs: 60,
            ratings_timeout_secs: 15,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// 通过任意查找函数加载配置
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        let config = Self {
            batches: parse_var(&lookup, "SCRAPER_BATCHES", "usize")?.unwrap_or(default.batches),
            delay_secs: parse_var(&lookup, "SCRAPER_DELAY", "f64")?.unwrap_or(default.delay_secs),
            headless: parse_var(&lookup, "SCRAPER_HEADLESS", "bool")?.unwrap_or(default.headless),
            phase_pause_secs: parse_var(&lookup, "SCRAPER_PHASE_PAUSE", "f64")?
                .unwrap_or(default.phase_pause_secs),
            base_url: lookup("SCRAPER_BASE_URL").unwrap_or(default.base_url),
            isbn_csv: lookup("SCRAPER_ISBN_CSV")
                .map(PathBuf::from)
                .unwrap_or(default.isbn_csv),
            selectors_file: lookup("SCRAPER_SELECTORS")
                .map(PathBuf::from)
                .unwrap_or(default.selectors_file),
            url_dataset_dir: default.url_dataset_dir,
            url_dataset_name: default.url_dataset_name,
            book_dataset_dir: default.book_dataset_dir,
            book_dataset_name: default.book_dataset_name,
            chrome_executable: lookup("SCRAPER_CHROME").map(PathBuf::from),
            navigation_timeout_secs: parse_var(&lookup, "SCRAPER_NAV_TIMEOUT", "u64")?
                .unwrap_or(default.navigation_timeout_secs),
            element_timeout_secs: parse_var(&lookup, "SCRAPER_ELEMENT_TIMEOUT", "u64")?
                .unwrap_or(default.element_timeout_secs),
            ratings_timeout_secs: default.ratings_timeout_secs,
        };
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batches == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        for secs in [self.delay_secs, self.phase_pause_secs] {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(ConfigError::InvalidDelay(secs));
            }
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_secs)
    }

    pub fn phase_pause(&self) -> Duration {
        Duration::from_secs_f64(self.phase_pause_secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    pub fn ratings_timeout(&self) -> Duration {
        Duration::from_secs(self.ratings_timeout_secs)
    }

    /// 第一阶段的 CSV 输出路径
    pub fn url_dataset_path(&self) -> PathBuf {
        self.url_dataset_dir
            .join(format!("{}.csv", self.url_dataset_name))
    }

    /// 第二阶段的 CSV 输出路径
    pub fn book_dataset_path(&self) -> PathBuf {
        self.book_dataset_dir
            .join(format!("{}.csv", self.book_dataset_name))
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.batches, 10);
        assert_eq!(config.delay(), Duration::from_secs(2));
        assert!(config.headless);
        assert_eq!(config.navigation_timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_overrides_defaults() {
        let config = Config::from_vars(lookup_from(&[
            ("SCRAPER_BATCHES", "3"),
            ("SCRAPER_DELAY", "0.5"),
            ("SCRAPER_HEADLESS", "false"),
            ("SCRAPER_CHROME", "/usr/bin/chromium"),
        ]))
        .unwrap();

        assert_eq!(config.batches, 3);
        assert_eq!(config.delay(), Duration::from_millis(500));
        assert!(!config.headless);
        assert_eq!(
            config.chrome_executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
        assert_eq!(config.base_url, Config::default().base_url);
    }

    #[test]
    fn test_from_vars_rejects_unparseable_value() {
        let err = Config::from_vars(lookup_from(&[("SCRAPER_BATCHES", "many")])).unwrap_err();
        match err {
            ConfigError::EnvVarParseFailed {
                var_name, value, ..
            } => {
                assert_eq!(var_name, "SCRAPER_BATCHES");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_batches_and_negative_delay() {
        let zero = Config {
            batches: 0,
            ..Config::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::InvalidBatchSize)));

        let negative = Config {
            delay_secs: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidDelay(_))
        ));
    }

    #[test]
    fn test_validate_rejects_delay_beyond_duration_range() {
        let huge_delay = Config {
            delay_secs: 1e20,
            ..Config::default()
        };
        assert!(matches!(
            huge_delay.validate(),
            Err(ConfigError::InvalidDelay(secs)) if secs == 1e20
        ));

        let huge_pause = Config {
            phase_pause_secs: f64::MAX,
            ..Config::default()
        };
        assert!(matches!(
            huge_pause.validate(),
            Err(ConfigError::InvalidDelay(_))
        ));

        let nan = Config {
            delay_secs: f64::NAN,
            ..Config::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_dataset_paths() {
        let config = Config::default();
        assert_eq!(
            config.url_dataset_path(),
            PathBuf::from("dynamic url datasets").join("isbn13 url datasets.csv")
        );
        assert_eq!(
            config.book_dataset_path(),
            PathBuf::from("isbn13 datasets").join("isbn13 book datasets.csv")
        );
    }
}
