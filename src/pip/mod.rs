//! pip 命令封装模块

pub mod parser;
pub mod types;

pub use types::{CommandResult, OutdatedEntry};

use crate::source::SourceSelection;
use anyhow::Result;
use std::io;
use std::process::{Command, Stdio};

/// 候选的 pip 可执行名，按探测顺序
const CANDIDATES: &[&str] = &["pip", "pip3"];

/// pip 调用器。所有对外部包管理器的调用都经过这里，
/// 统一捕获 stdout / stderr / 退出状态。
#[derive(Debug, Clone)]
pub struct Pip {
    pub command: String,
}

impl Pip {
    /// 依次探测候选命令，返回第一个能执行 `--version` 的
    pub fn detect() -> Option<Self> {
        for candidate in CANDIDATES {
            if Self::probe(candidate) {
                return Some(Pip {
                    command: candidate.to_string(),
                });
            }
        }
        None
    }

    /// 用一次 `--version` 调用验证命令是否可用
    pub fn probe(command: &str) -> bool {
        Command::new(command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// 执行 pip 子命令并静默捕获输出。
    ///
    /// 永不向外抛错：找不到可执行文件、非零退出、其他 IO 错误
    /// 都折叠成 `success = false` 的结果，stderr 携带原因。
    /// `source` 为 Some 时在参数末尾附加当前镜像源的 `-i` 参数对。
    pub fn capture(&self, args: &[&str], source: Option<&SourceSelection>) -> CommandResult {
        let mut full_args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        if let Some(selection) = source {
            full_args.extend(selection.index_args());
        }

        log::debug!("执行: {} {}", self.command, full_args.join(" "));

        match Command::new(&self.command).args(&full_args).output() {
            Ok(output) => CommandResult {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                CommandResult::failure(format!("命令 {} 找不到文件.", self.command))
            }
            Err(e) => CommandResult::failure(format!("发生未知错误: {}", e)),
        }
    }

    /// 执行会改动环境的 pip 子命令，失败时把诊断信息打印给用户。
    ///
    /// 调用方只需要看 `success`：失败即认为操作没有发生。
    pub fn run(&self, args: &[&str], source: Option<&SourceSelection>) -> CommandResult {
        let result = self.capture(args, source);
        if !result.success {
            eprintln!("\n命令 {} {} 失败:", self.command, args.join(" "));
            let detail = result.stderr.trim();
            if !detail.is_empty() {
                eprintln!("{}", detail);
            }
        }
        result
    }

    // ===== 查询 =====

    /// 获取包详情原始文本 (pip show)
    pub fn show(&self, package: &str) -> Result<String> {
        let result = self.capture(&["show", package], None);
        if !result.success {
            anyhow::bail!("pip show {} 执行失败: {}", package, result.stderr.trim());
        }
        Ok(result.stdout)
    }

    /// 获取过时包列表原始文本 (pip list --outdated)，走当前镜像源
    pub fn list_outdated(&self, source: &SourceSelection) -> Result<String> {
        let result = self.capture(&["list", "--outdated"], Some(source));
        if !result.success {
            anyhow::bail!("pip list --outdated 执行失败: {}", result.stderr.trim());
        }
        Ok(result.stdout)
    }

    /// 获取全部已安装包的表格输出 (pip list --format=columns)
    pub fn list_columns(&self, source: &SourceSelection) -> Result<String> {
        let result = self.capture(&["list", "--format=columns"], Some(source));
        if !result.success {
            anyhow::bail!("pip list 执行失败: {}", result.stderr.trim());
        }
        Ok(result.stdout)
    }

    /// 获取 `name==version` 格式的已安装包列表 (pip list --format=freeze)
    pub fn list_freeze(&self) -> Result<String> {
        let result = self.capture(&["list", "--format=freeze"], None);
        if !result.success {
            anyhow::bail!("pip list --format=freeze 执行失败: {}", result.stderr.trim());
        }
        Ok(result.stdout)
    }

    /// 获取 `pip --version` 输出
    pub fn version_output(&self) -> Result<String> {
        let result = self.capture(&["--version"], None);
        if !result.success {
            anyhow::bail!("pip --version 执行失败: {}", result.stderr.trim());
        }
        Ok(result.stdout)
    }
}
