//! pip 镜像源注册表与当前源选择

/// 镜像源定义
#[derive(Debug, Clone, Copy)]
pub struct Mirror {
    pub name: &'static str,
    pub label: &'static str,
    pub url: &'static str,
}

/// 固定镜像源表，顺序与切换源子菜单的编号一致
pub const MIRRORS: &[Mirror] = &[
    Mirror { name: "aliyun", label: "阿里云", url: "https://mirrors.aliyun.com/pypi/simple/" },
    Mirror { name: "tsinghua", label: "清华大学", url: "https://pypi.tuna.tsinghua.edu.cn/simple/" },
    Mirror { name: "douban", label: "豆瓣", url: "https://pypi.douban.com/simple/" },
    Mirror { name: "ustc", label: "中国科学技术大学", url: "https://pypi.mirrors.ustc.edu.cn/simple/" },
    Mirror { name: "huawei", label: "华为云", url: "https://mirrors.huaweicloud.com/repository/pypi/simple/" },
    Mirror { name: "tencent", label: "腾讯云", url: "https://mirrors.cloud.tencent.com/pypi/simple/" },
    Mirror { name: "netease", label: "网易", url: "https://mirrors.163.com/pypi/simple/" },
    Mirror { name: "baidu", label: "百度", url: "https://mirror.baidu.com/pypi/simple/" },
    Mirror { name: "default", label: "默认源", url: "https://pypi.org/simple/" },
];

/// 按助记名查找镜像源
pub fn find_mirror(name: &str) -> Option<&'static Mirror> {
    MIRRORS.iter().find(|m| m.name == name)
}

/// 当前镜像源选择。
///
/// 不做持久化，每次进程启动都回到默认官方源；默认状态下
/// 不向 pip 附加任何 `-i` 参数。
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceSelection {
    active: Option<&'static Mirror>,
}

impl SourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按名称切换镜像源；未知名称保持当前选择不变并返回 None
    pub fn select(&mut self, name: &str) -> Option<&'static Mirror> {
        let mirror = find_mirror(name)?;
        self.active = Some(mirror);
        Some(mirror)
    }

    /// 当前源的助记名；从未切换过时为 "default"
    pub fn current_name(&self) -> &'static str {
        self.active.map(|m| m.name).unwrap_or("default")
    }

    /// 传给 pip 的 `-i <url>` 参数对；未切换过时为空
    pub fn index_args(&self) -> Vec<String> {
        match self.active {
            Some(mirror) => vec!["-i".to_string(), mirror.url.to_string()],
            None => Vec::new(),
        }
    }
}
