//! 运行环境信息采集与网络探测

use crate::pip::{parser, Pip};
use std::net::ToSocketAddrs;
use std::process::Command;

/// 启动时打印的环境信息
#[derive(Debug, Clone)]
pub struct EnvironmentInfo {
    pub os: &'static str,
    pub arch: &'static str,
    pub bits: &'static str,
    pub kernel: String,
    pub cwd: String,
    pub pip_path: String,
    pub pip_version: String,
    pub python_version: String,
}

impl EnvironmentInfo {
    /// 采集环境信息；任何拿不到的字段显示为 "未知"
    pub fn detect(pip: &Pip) -> Self {
        let version_banner = pip.capture(&["--version"], None);
        let (pip_version, python_version) = if version_banner.success {
            (
                parser::parse_pip_version(&version_banner.stdout)
                    .unwrap_or_else(|| "未知".to_string()),
                parser::parse_python_version(&version_banner.stdout)
                    .unwrap_or_else(|| "未知".to_string()),
            )
        } else {
            ("未知".to_string(), "未知".to_string())
        };

        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            bits: if cfg!(target_pointer_width = "64") {
                "64位"
            } else {
                "32位"
            },
            kernel: run_cmd("uname", &["-sr"]),
            cwd: std::env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "未知".to_string()),
            pip_path: run_cmd("which", &[pip.command.as_str()]),
            pip_version,
            python_version,
        }
    }

    pub fn print(&self) {
        println!("\n=== 环境检查 ===");
        println!("Python版本: {}", self.python_version);
        println!("操作系统: {} ({})", self.os, self.bits);
        println!("系统版本: {}", self.kernel);
        println!("处理器架构: {}", self.arch);
        println!("Pip版本: {}", self.pip_version);
        println!("当前工作目录: {}", self.cwd);
        println!("Pip可执行路径: {}", self.pip_path);
        println!("================\n");
    }
}

fn run_cmd(cmd: &str, args: &[&str]) -> String {
    Command::new(cmd)
        .args(args)
        .output()
        .ok()
        .and_then(|o| {
            if o.status.success() {
                let s = String::from_utf8_lossy(&o.stdout).trim().to_string();
                if s.is_empty() {
                    None
                } else {
                    Some(s)
                }
            } else {
                None
            }
        })
        .unwrap_or_else(|| "未知".to_string())
}

/// DNS 可达性探测：能解析出至少一个地址就算连通
pub fn network_reachable(host: &str) -> bool {
    (host, 443)
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}
