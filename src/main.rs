mod config;
mod deps;
mod error;
mod pip;
mod remote;
mod shell;
mod source;
mod sysinfo;
mod update;

use anyhow::Result;
use error::StartupError;
use pip::{parser, Pip};

/// 运行 pip 所要求的最低 Python 版本
const MIN_PYTHON: (u32, u32, u32) = (3, 6, 1);
const MIN_PYTHON_TEXT: &str = "3.6.1";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("pipman v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load_or_default()?;

    let pip = match resolve_pip() {
        Ok(pip) => pip,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("多次尝试无效，请确保pip已安装并添加到PATH中。你可以通过以下命令安装pip:");
            eprintln!("curl https://bootstrap.pypa.io/get-pip.py -o get-pip.py && python get-pip.py");
            std::process::exit(1);
        }
    };

    if let Err(e) = check_python_version(&pip) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let remote = remote::RemoteClient::new(&config)?;

    let mut shell = shell::Shell::new(pip, remote, config);
    shell.startup_report().await;
    shell.run().await;

    Ok(())
}

/// 解析可用的 pip 命令。
///
/// 先探测固定候选（pip / pip3），全部失败后允许用户手动输入，
/// 最多重试 3 次；输入 exit 或重试耗尽则以非零状态退出。
fn resolve_pip() -> Result<Pip, StartupError> {
    if let Some(pip) = Pip::detect() {
        return Ok(pip);
    }

    let mut retries = 3;
    while retries > 0 {
        let input = match shell::read_line(
            "未找到pip或pip3，请手动输入pip命令 (例如 'pip' 或 'pip3')，或输入 'exit' 退出: ",
        ) {
            Some(input) => input,
            None => break,
        };
        if input.eq_ignore_ascii_case("exit") {
            println!("退出程序.");
            std::process::exit(1);
        }
        if !input.is_empty() && Pip::probe(&input) {
            return Ok(Pip { command: input });
        }
        retries -= 1;
        println!("手动输入的pip命令无效，请重新输入 ({} 次尝试剩余).", retries);
    }

    Err(StartupError::PipUnresolvable)
}

/// 版本门槛：从 `pip --version` 的括号部分取 Python 版本。
///
/// 解析不出版本号只记一条警告，不阻塞启动。
fn check_python_version(pip: &Pip) -> Result<(), StartupError> {
    let banner = match pip.version_output() {
        Ok(output) => output,
        Err(e) => {
            log::warn!("获取 pip 版本信息失败: {}", e);
            return Ok(());
        }
    };

    match parser::parse_python_version(&banner) {
        Some(version) => {
            if parser::version_at_least(&version, MIN_PYTHON) {
                println!("当前Python版本为 {}, 符合要求.", version);
                Ok(())
            } else {
                Err(StartupError::PythonTooOld {
                    found: version,
                    min: MIN_PYTHON_TEXT.to_string(),
                })
            }
        }
        None => {
            log::warn!("无法从 pip --version 输出中解析 Python 版本");
            Ok(())
        }
    }
}
