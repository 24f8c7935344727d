//! 启动阶段的致命错误。
//!
//! 只有这两种错误允许终止进程，其余失败都在菜单循环内
//! 转成用户提示后继续。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("当前 Python 版本为 {found}，需要 Python {min} 或更高版本.")]
    PythonTooOld { found: String, min: String },

    #[error("未找到可用的 pip 命令")]
    PipUnresolvable,
}
