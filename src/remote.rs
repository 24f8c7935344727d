//! 远程信息查询（PyPI 包名校验 / 随机一言 / 公告）

use crate::config::Config;
use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const PYPI_JSON_API: &str = "https://pypi.org/pypi";

/// 一言接口的响应结构: {"code": 200, "data": {"hitokoto": "..."}}
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    code: i64,
    data: Option<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    hitokoto: String,
}

/// 共享的 HTTP 客户端，所有请求带统一的短超时
pub struct RemoteClient {
    client: Client,
    quote_url: String,
    announcement_url: String,
}

impl RemoteClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            quote_url: config.quote_url.clone(),
            announcement_url: config.announcement_url.clone(),
        })
    }

    /// 校验包名是否存在于 PyPI 公共索引。
    ///
    /// 只有 2xx 响应算存在；网络错误打印后按不存在处理，
    /// 私有镜像独有的包会因此被拒绝，这是已知取舍。
    pub async fn package_exists(&self, package: &str) -> bool {
        let url = pypi_metadata_url(package);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                eprintln!("验证包名时发生错误: {}", e);
                false
            }
        }
    }

    /// 获取随机一言
    pub async fn fetch_quote(&self) -> Result<String> {
        let response = self.client.get(&self.quote_url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("一言接口返回状态码 {}", response.status());
        }
        let quote: QuoteResponse = response.json().await?;
        match quote.data {
            Some(data) if quote.code == 200 => Ok(data.hitokoto),
            _ => anyhow::bail!("数据结构不正确"),
        }
    }

    /// 获取公告正文（去掉首尾空白）
    pub async fn fetch_announcement(&self) -> Result<String> {
        let response = self.client.get(&self.announcement_url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("公告接口返回状态码 {}", response.status());
        }
        Ok(response.text().await?.trim().to_string())
    }
}

fn pypi_metadata_url(package: &str) -> String {
    format!("{}/{}/json", PYPI_JSON_API, package)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_url_points_at_per_package_json() {
        assert_eq!(
            pypi_metadata_url("requests"),
            "https://pypi.org/pypi/requests/json"
        );
    }

    #[test]
    fn quote_response_decodes_expected_shape() {
        let body = r#"{"code": 200, "data": {"hitokoto": "落霞与孤鹜齐飞"}}"#;
        let quote: QuoteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(quote.code, 200);
        assert_eq!(quote.data.unwrap().hitokoto, "落霞与孤鹜齐飞");
    }

    #[test]
    fn quote_response_tolerates_missing_data() {
        let body = r#"{"code": 500}"#;
        let quote: QuoteResponse = serde_json::from_str(body).unwrap();
        assert!(quote.data.is_none());
    }
}
