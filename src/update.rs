//! 批量更新：按包并发执行 `pip install --upgrade`

use crate::pip::{OutdatedEntry, Pip};
use crate::source::SourceSelection;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// 单个包的升级执行者，工作任务只通过它触碰外部世界
pub trait PackageUpgrader: Send + Sync + 'static {
    /// 返回 true 表示升级成功
    fn upgrade(&self, package: &str) -> bool;
}

/// 真实实现：带当前镜像源的 pip 调用
pub struct PipUpgrader {
    pub pip: Pip,
    pub source: SourceSelection,
}

impl PackageUpgrader for PipUpgrader {
    fn upgrade(&self, package: &str) -> bool {
        self.pip
            .run(&["install", "--upgrade", package], Some(&self.source))
            .success
    }
}

/// 工作任务发给消费者的事件；所有打印都发生在消费者一侧
enum UpdateEvent {
    Started(OutdatedEntry),
    Succeeded(OutdatedEntry),
    Failed(OutdatedEntry),
}

/// 并发更新一批过时包，返回失败的包名（按完成顺序）。
///
/// 每个条目一个任务，信号量把同时运行的 pip 进程数压在 `limit` 以内；
/// 阻塞的子进程调用放在 spawn_blocking 线程上。事件经 channel 汇聚到
/// 唯一的消费循环，由它独占控制台输出和失败列表，避免交错打印。
/// 函数在所有任务结束、事件流排空之后才返回。
pub async fn run_batch<U: PackageUpgrader>(
    upgrader: Arc<U>,
    entries: &[OutdatedEntry],
    limit: usize,
) -> Vec<String> {
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel::<UpdateEvent>();

    let mut handles = Vec::with_capacity(entries.len());
    for entry in entries.iter().cloned() {
        let semaphore = Arc::clone(&semaphore);
        let upgrader = Arc::clone(&upgrader);
        let tx = tx.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            let _ = tx.send(UpdateEvent::Started(entry.clone()));

            let package = entry.package.clone();
            let worker = Arc::clone(&upgrader);
            let success = tokio::task::spawn_blocking(move || worker.upgrade(&package))
                .await
                .unwrap_or(false);

            let event = if success {
                UpdateEvent::Succeeded(entry)
            } else {
                UpdateEvent::Failed(entry)
            };
            let _ = tx.send(event);
        }));
    }
    // 丢掉本地发送端，最后一个工作任务结束后 rx 才会关闭
    drop(tx);

    let mut failed = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            UpdateEvent::Started(entry) => {
                println!("\n正在更新 {}...", entry.package);
                println!("当前版本: {}", entry.current_version);
                println!("最新版本: {}", entry.latest_version);
            }
            UpdateEvent::Succeeded(entry) => {
                println!("{} 更新成功. 新版本: {}.", entry.package, entry.latest_version);
            }
            UpdateEvent::Failed(entry) => {
                println!("{} 更新失败.", entry.package);
                failed.push(entry.package);
            }
        }
    }

    for handle in handles {
        let _ = handle.await;
    }

    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct ScriptedUpgrader {
        failing: HashSet<&'static str>,
    }

    impl PackageUpgrader for ScriptedUpgrader {
        fn upgrade(&self, package: &str) -> bool {
            !self.failing.contains(package)
        }
    }

    fn entry(name: &str) -> OutdatedEntry {
        OutdatedEntry {
            package: name.to_string(),
            current_version: "1.0".to_string(),
            latest_version: "2.0".to_string(),
        }
    }

    #[tokio::test]
    async fn batch_collects_only_the_failed_package() {
        let entries = vec![entry("aaa"), entry("bbb"), entry("ccc")];
        let upgrader = Arc::new(ScriptedUpgrader {
            failing: HashSet::from(["bbb"]),
        });
        let failed = run_batch(upgrader, &entries, 4).await;
        assert_eq!(failed, vec!["bbb".to_string()]);
    }

    #[tokio::test]
    async fn batch_with_no_failures_returns_empty() {
        let entries = vec![entry("aaa"), entry("bbb")];
        let upgrader = Arc::new(ScriptedUpgrader {
            failing: HashSet::new(),
        });
        let failed = run_batch(upgrader, &entries, 2).await;
        assert!(failed.is_empty());
    }

    #[tokio::test]
    async fn limit_of_one_still_processes_every_entry() {
        let entries = vec![entry("a"), entry("b"), entry("c"), entry("d")];
        let upgrader = Arc::new(ScriptedUpgrader {
            failing: HashSet::from(["c", "d"]),
        });
        let mut failed = run_batch(upgrader, &entries, 1).await;
        failed.sort();
        assert_eq!(failed, vec!["c".to_string(), "d".to_string()]);
    }

    #[tokio::test]
    async fn zero_limit_is_clamped_instead_of_deadlocking() {
        let entries = vec![entry("a")];
        let upgrader = Arc::new(ScriptedUpgrader {
            failing: HashSet::new(),
        });
        let failed = run_batch(upgrader, &entries, 0).await;
        assert!(failed.is_empty());
    }
}
