//! pip 输出解析函数

use super::types::OutdatedEntry;

/// 解析 `pip list --outdated` 的表格输出。
///
/// 前两行是表头和分隔线，跳过；之后每行按空白切分，
/// 取前三列 (包名, 当前版本, 最新版本)，列数不足的行忽略。
pub fn parse_outdated(output: &str) -> Vec<OutdatedEntry> {
    output
        .lines()
        .skip(2)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 {
                Some(OutdatedEntry {
                    package: parts[0].to_string(),
                    current_version: parts[1].to_string(),
                    latest_version: parts[2].to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// 从 `pip show` 输出中提取 Version 字段
pub fn parse_show_version(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 从 `pip show` 输出中提取 Requires 列表（逗号分隔，可能为空）
pub fn parse_requires(output: &str) -> Vec<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Requires:"))
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|dep| !dep.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 解析 `pip list --format=freeze` 输出为包名列表（`==` 之前的部分）
pub fn parse_freeze_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                line.split("==").next().map(str::to_string)
            }
        })
        .collect()
}

/// 从 `pip --version` 输出中提取 pip 自身的版本号。
///
/// 典型输出: `pip 23.2.1 from /usr/lib/python3.11/site-packages/pip (python 3.11)`
pub fn parse_pip_version(output: &str) -> Option<String> {
    let mut tokens = output.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some("pip"), Some(version)) => Some(version.to_string()),
        _ => None,
    }
}

/// 从 `pip --version` 输出中提取括号里的 Python 版本号
pub fn parse_python_version(output: &str) -> Option<String> {
    let start = output.find("(python ")? + "(python ".len();
    let rest = &output[start..];
    let end = rest.find(')')?;
    let version = rest[..end].trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// 判断点分版本号是否不低于给定下限；缺失或非数字的段按 0 处理
pub fn version_at_least(version: &str, min: (u32, u32, u32)) -> bool {
    let mut parts = version
        .split('.')
        .map(|part| part.trim().parse::<u32>().unwrap_or(0));
    let found = (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    );
    found >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTDATED_BLOB: &str = "\
Package    Version Latest Type
---------- ------- ------ -----
requests   2.28.0  2.31.0 wheel
numpy      1.24.0  1.26.4 wheel
pip        23.0    24.0   wheel
";

    #[test]
    fn parse_outdated_yields_rows_in_input_order() {
        let entries = parse_outdated(OUTDATED_BLOB);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].package, "requests");
        assert_eq!(entries[0].current_version, "2.28.0");
        assert_eq!(entries[0].latest_version, "2.31.0");
        assert_eq!(entries[1].package, "numpy");
        assert_eq!(entries[2].package, "pip");
    }

    #[test]
    fn parse_outdated_skips_headers_and_short_rows() {
        let blob = "Package Version Latest Type\n---- ---- ---- ----\nonly two\n";
        assert!(parse_outdated(blob).is_empty());
    }

    #[test]
    fn parse_outdated_empty_output() {
        assert!(parse_outdated("").is_empty());
    }

    const SHOW_BLOB: &str = "\
Name: requests
Version: 2.31.0
Summary: Python HTTP for Humans.
Requires: certifi, charset-normalizer, idna, urllib3
Required-by:
";

    #[test]
    fn parse_show_version_extracts_value() {
        assert_eq!(parse_show_version(SHOW_BLOB), Some("2.31.0".to_string()));
    }

    #[test]
    fn parse_show_version_missing_field() {
        assert_eq!(parse_show_version("Name: foo\n"), None);
    }

    #[test]
    fn parse_requires_splits_on_commas() {
        assert_eq!(
            parse_requires(SHOW_BLOB),
            vec!["certifi", "charset-normalizer", "idna", "urllib3"]
        );
    }

    #[test]
    fn parse_requires_empty_value_means_no_dependencies() {
        assert!(parse_requires("Name: six\nVersion: 1.16.0\nRequires: \n").is_empty());
    }

    #[test]
    fn parse_freeze_names_strips_versions() {
        let blob = "requests==2.31.0\nnumpy==1.26.4\n\nsix==1.16.0\n";
        assert_eq!(parse_freeze_names(blob), vec!["requests", "numpy", "six"]);
    }

    #[test]
    fn parse_pip_and_python_version_from_banner() {
        let banner = "pip 23.2.1 from /usr/lib/python3.11/site-packages/pip (python 3.11)";
        assert_eq!(parse_pip_version(banner), Some("23.2.1".to_string()));
        assert_eq!(parse_python_version(banner), Some("3.11".to_string()));
    }

    #[test]
    fn parse_python_version_missing_marker() {
        assert_eq!(parse_python_version("pip 23.2.1 from /somewhere"), None);
    }

    #[test]
    fn version_at_least_compares_segment_wise() {
        assert!(version_at_least("3.11", (3, 6, 1)));
        assert!(version_at_least("3.6.1", (3, 6, 1)));
        assert!(!version_at_least("3.6.0", (3, 6, 1)));
        assert!(!version_at_least("3.6", (3, 6, 1)));
        assert!(!version_at_least("2.7.18", (3, 6, 1)));
    }
}
