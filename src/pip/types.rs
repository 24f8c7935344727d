//! pip 命令相关数据类型

/// 命令执行结果
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// 构造一个没有进程输出的失败结果，stderr 携带失败原因
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message.into(),
        }
    }
}

/// `pip list --outdated` 中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedEntry {
    pub package: String,
    pub current_version: String,
    pub latest_version: String,
}
