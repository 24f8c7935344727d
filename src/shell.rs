//! 交互式菜单主循环

use crate::config::Config;
use crate::deps;
use crate::pip::{parser, Pip};
use crate::remote::RemoteClient;
use crate::source::{SourceSelection, MIRRORS};
use crate::sysinfo::{self, EnvironmentInfo};
use crate::update::{self, PipUpgrader};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// 打印提示并读取一行输入（去掉首尾空白）；EOF 或读取失败返回 None
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// 反复提示直到拿到非空的库名；EOF 返回 None
fn read_package_name(prompt: &str) -> Option<String> {
    loop {
        let input = read_line(prompt)?;
        if !input.is_empty() {
            return Some(input);
        }
        println!("请输入有效的库名.");
    }
}

/// 确认输入只认 y / Y，其余一律视为否
pub fn is_yes(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

fn confirm(prompt: &str) -> bool {
    read_line(prompt).map(|input| is_yes(&input)).unwrap_or(false)
}

pub struct Shell {
    pip: Pip,
    source: SourceSelection,
    remote: RemoteClient,
    config: Config,
}

impl Shell {
    pub fn new(pip: Pip, remote: RemoteClient, config: Config) -> Self {
        Self {
            pip,
            source: SourceSelection::new(),
            remote,
            config,
        }
    }

    /// 启动报告：当前源、环境信息、网络探测和随机一言
    pub async fn startup_report(&self) {
        println!("\n当前使用的pip源: {}", self.source.current_name());

        EnvironmentInfo::detect(&self.pip).print();

        if sysinfo::network_reachable(&self.config.probe_host) {
            match self.remote.fetch_quote().await {
                Ok(quote) => println!("{}", quote),
                Err(e) => println!("获取随机一言失败: {}", e),
            }
        } else {
            println!("无法连接到互联网，请检查您的网络连接.");
        }
    }

    /// 菜单主循环，直到用户选择退出或输入流结束
    pub async fn run(&mut self) {
        loop {
            println!("\n请选择操作:");
            println!("1. 切换pip源");
            println!("2. 安装库");
            println!("3. 更新单个库");
            println!("4. 更新所有库");
            println!("5. 卸载库");
            println!("6. 列出所有库");
            println!("7. 显示库详情");
            println!("8. 获取公告");
            println!("9. 退出");

            let Some(choice) = read_line("请输入选项 (1/2/3/4/5/6/7/8/9): ") else {
                break;
            };
            if choice == "9" {
                println!("退出程序.");
                break;
            }

            match choice.as_str() {
                "1" => self.switch_source(),
                "2" => self.install().await,
                "3" => {
                    if let Some(package) = read_package_name("请输入库名: ") {
                        self.update_single(&package).await;
                    }
                }
                "4" => self.update_all().await,
                "5" => self.uninstall(),
                "6" => self.list_all(),
                "7" => self.show_details(),
                "8" => self.fetch_announcement().await,
                _ => println!("无效的选择，请输入 1, 2, 3, 4, 5, 6, 7, 8 或 9."),
            }

            if read_line("\n按回车键返回主菜单...").is_none() {
                break;
            }
        }
    }

    fn switch_source(&mut self) {
        println!("\n请选择pip源:");
        for (i, mirror) in MIRRORS.iter().enumerate() {
            println!("{}. {}", i + 1, mirror.label);
        }

        let Some(choice) = read_line("请输入源编号 (1-9): ") else {
            return;
        };
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| MIRRORS.get(i));

        match picked {
            Some(mirror) => {
                self.source.select(mirror.name);
                println!("已切换到 {} 源: {}", mirror.name, mirror.url);
            }
            None => println!("无效的选择，请输入 1-9 之间的数字。"),
        }
    }

    async fn install(&self) {
        let Some(package) = read_package_name("请输入库名: ") else {
            return;
        };
        let Some(version) = read_line("请输入版本号（留空以安装最新版本）: ") else {
            return;
        };

        if !self.remote.package_exists(&package).await {
            println!("\n包名 '{}' 在PyPI上不存在.", package);
            return;
        }

        let spec = if version.is_empty() {
            package.clone()
        } else {
            format!("{}=={}", package, version)
        };

        if self.pip.run(&["install", &spec], Some(&self.source)).success {
            println!("\n{} 安装成功.", spec);
        } else {
            println!("\n{} 安装失败.", spec);
            println!("pip search 命令已被弃用，无法建议相似的包名.");
        }
    }

    /// 更新单个包：校验包名、取当前版本、升级、再取新版本
    async fn update_single(&self, package: &str) {
        if !self.remote.package_exists(package).await {
            println!("\n包名 '{}' 在PyPI上不存在.", package);
            return;
        }

        let current_version = match self.pip.show(package) {
            Ok(output) => parser::parse_show_version(&output),
            Err(e) => {
                println!("\n获取 {} 详细信息失败: {}", package, e);
                return;
            }
        };
        let Some(current_version) = current_version else {
            println!("\n无法获取 {} 的当前版本.", package);
            return;
        };

        println!("\n正在更新 {}...", package);
        println!("当前版本: {}", current_version);

        if !self
            .pip
            .run(&["install", "--upgrade", package], Some(&self.source))
            .success
        {
            println!("{} 更新失败.", package);
            return;
        }

        let new_version = self
            .pip
            .show(package)
            .ok()
            .and_then(|output| parser::parse_show_version(&output));
        match new_version {
            Some(version) => println!("更新成功. 新版本: {}.", version),
            None => println!("无法获取 {} 的更新后版本.", package),
        }
    }

    /// 批量更新：列出过时包、确认、并发更新、可选重试失败项
    async fn update_all(&self) {
        let output = match self.pip.list_outdated(&self.source) {
            Ok(output) => output,
            Err(e) => {
                println!("\n获取过时库列表失败: {}", e);
                return;
            }
        };
        let outdated = parser::parse_outdated(&output);

        if outdated.is_empty() {
            println!("\n没有可更新的库.");
            self.list_all();
            return;
        }

        println!("\n以下库可更新:");
        println!("{:<20} {:<15} {:<15}", "包名", "当前版本", "最新版本");
        println!("{}", "-".repeat(50));
        for entry in &outdated {
            println!(
                "{:<20} {:<15} → {:<15}",
                entry.package, entry.current_version, entry.latest_version
            );
        }

        if !confirm("\n确定要更新以上所有库吗？(y/n): ") {
            println!("已取消批量更新.");
            return;
        }

        let upgrader = Arc::new(PipUpgrader {
            pip: self.pip.clone(),
            source: self.source,
        });
        let limit = self.config.effective_parallelism();
        let failed = update::run_batch(upgrader, &outdated, limit).await;

        if failed.is_empty() {
            return;
        }
        println!("\n以下包更新失败:");
        for package in &failed {
            println!("- {}", package);
        }
        if confirm("是否重试失败的更新? (y/n): ") {
            for package in &failed {
                self.update_single(package).await;
            }
        }
    }

    /// 卸载：先做共享依赖检查，被依赖时要求确认
    fn uninstall(&self) {
        let Some(package) = read_package_name("请输入库名: ") else {
            return;
        };

        let freeze = match self.pip.list_freeze() {
            Ok(output) => output,
            Err(e) => {
                println!("\n列出已安装库失败: {}", e);
                return;
            }
        };
        let installed = parser::parse_freeze_names(&freeze);

        let dependents = deps::dependents_of(&self.pip, &package, &installed);
        if !dependents.is_empty() {
            println!("\n警告: {} 被以下包依赖: {}", package, dependents.join(", "));
            if !confirm("确定要卸载吗? (y/n): ") {
                println!("取消卸载.");
                return;
            }
        }

        // 卸载不需要镜像源参数
        if self.pip.run(&["uninstall", "-y", &package], None).success {
            println!("\n{} 卸载成功.", package);
        } else {
            println!("\n{} 卸载失败.", package);
            println!("请检查以下几点:");
            println!("1. 确保你有足够的权限来卸载该包.");
            println!("2. 检查是否有其他包依赖于该包.");
            println!("3. 尝试手动卸载该包，使用命令: pip uninstall -y {}", package);
        }
    }

    fn list_all(&self) {
        match self.pip.list_columns(&self.source) {
            Ok(output) => {
                println!("\n已安装的库:");
                println!("{}", output);
            }
            Err(e) => println!("\n列出已安装库失败: {}", e),
        }
    }

    fn show_details(&self) {
        let Some(package) = read_package_name("请输入库名: ") else {
            return;
        };
        match self.pip.show(&package) {
            Ok(output) => {
                println!("\n包详细信息:");
                println!("{}", output);
            }
            Err(e) => println!("\n获取包详细信息失败: {}", e),
        }
    }

    async fn fetch_announcement(&self) {
        match self.remote.fetch_announcement().await {
            Ok(text) if !text.is_empty() => {
                println!("\n公告内容:");
                println!("{}", text);
            }
            Ok(_) => println!("\n获取公告内容失败，数据为空."),
            Err(e) => println!("\n获取公告失败: {}", e),
        }
    }
}
