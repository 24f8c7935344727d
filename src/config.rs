use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 远程请求的统一超时（秒）
    pub request_timeout_secs: u64,
    /// 启动时做 DNS 可达性探测的主机
    pub probe_host: String,
    pub quote_url: String,
    pub announcement_url: String,
    /// 批量更新的并发上限，0 表示取 CPU 核心数
    pub parallel_updates: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: 5,
            probe_host: "360.com".to_string(),
            quote_url: "https://api.52vmy.cn/api/wl/yan/yiyan".to_string(),
            announcement_url: "https://gg.ikdxhz.us.kg/".to_string(),
            parallel_updates: 0,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let config_path = PathBuf::from(home).join(".config/pipman/config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 批量更新实际使用的并发数
    pub fn effective_parallelism(&self) -> usize {
        if self.parallel_updates > 0 {
            self.parallel_updates
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_from_toml() {
        let content = r#"
request_timeout_secs = 10
probe_host = "example.com"
quote_url = "https://quote.example/api"
announcement_url = "https://news.example/"
parallel_updates = 8
"#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.probe_host, "example.com");
        assert_eq!(config.parallel_updates, 8);
        assert_eq!(config.effective_parallelism(), 8);
    }

    #[test]
    fn auto_parallelism_is_at_least_one() {
        let config = Config::default();
        assert!(config.effective_parallelism() >= 1);
    }
}
