//! 依赖闭包计算，用于卸载前的被依赖警告

use crate::pip::{parser, Pip};
use std::collections::HashSet;

/// 依赖关系的查询来源。
///
/// 返回包声明的直接依赖；任何查询失败（包不存在、命令出错）
/// 都视为该节点没有依赖，遍历继续。
pub trait DependencyProvider {
    fn requires(&self, package: &str) -> Vec<String>;
}

impl DependencyProvider for Pip {
    fn requires(&self, package: &str) -> Vec<String> {
        let result = self.capture(&["show", package], None);
        if result.success {
            parser::parse_requires(&result.stdout)
        } else {
            Vec::new()
        }
    }
}

/// 计算种子包的传递依赖集合。
///
/// visited 集合保证即使依赖元数据成环也能终止：
/// A requires B、B requires A 时返回 {A, B}。
pub fn dependency_closure(provider: &dyn DependencyProvider, seeds: &[&str]) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut closure: HashSet<String> = HashSet::new();
    let mut pending: Vec<String> = seeds.iter().map(|s| s.to_string()).collect();

    while let Some(package) = pending.pop() {
        if !visited.insert(package.clone()) {
            continue;
        }
        for dep in provider.requires(&package) {
            closure.insert(dep.clone());
            pending.push(dep);
        }
    }

    closure
}

/// 找出与目标包共享传递依赖的其他已安装包。
///
/// 这是对真实反向依赖的近似：只要某个包的依赖闭包与目标包的
/// 闭包有交集就会被标记，而不是精确回答"谁直接依赖目标包"。
/// 提示语按此近似措辞，行为刻意保留。
pub fn dependents_of(
    provider: &dyn DependencyProvider,
    target: &str,
    installed: &[String],
) -> Vec<String> {
    let target_closure = dependency_closure(provider, &[target]);

    installed
        .iter()
        .filter(|name| name.as_str() != target)
        .filter(|name| {
            let deps = dependency_closure(provider, &[name.as_str()]);
            deps.iter().any(|dep| target_closure.contains(dep))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeGraph {
        edges: HashMap<&'static str, Vec<&'static str>>,
    }

    impl FakeGraph {
        fn new(edges: &[(&'static str, &[&'static str])]) -> Self {
            Self {
                edges: edges.iter().map(|(k, v)| (*k, v.to_vec())).collect(),
            }
        }
    }

    impl DependencyProvider for FakeGraph {
        fn requires(&self, package: &str) -> Vec<String> {
            self.edges
                .get(package)
                .map(|deps| deps.iter().map(|d| d.to_string()).collect())
                .unwrap_or_default()
        }
    }

    #[test]
    fn closure_follows_transitive_requirements() {
        let graph = FakeGraph::new(&[("app", &["lib"]), ("lib", &["base"])]);
        let closure = dependency_closure(&graph, &["app"]);
        assert_eq!(closure.len(), 2);
        assert!(closure.contains("lib"));
        assert!(closure.contains("base"));
    }

    #[test]
    fn closure_terminates_on_cycle() {
        let graph = FakeGraph::new(&[("a", &["b"]), ("b", &["a"])]);
        let closure = dependency_closure(&graph, &["a"]);
        assert_eq!(closure.len(), 2);
        assert!(closure.contains("a"));
        assert!(closure.contains("b"));
    }

    #[test]
    fn closure_of_leaf_is_empty() {
        let graph = FakeGraph::new(&[("app", &["lib"])]);
        assert!(dependency_closure(&graph, &["lib"]).is_empty());
    }

    #[test]
    fn dependents_flags_packages_sharing_a_requirement() {
        // target 和 other 都依赖 shared；standalone 独立
        let graph = FakeGraph::new(&[
            ("target", &["shared"]),
            ("other", &["shared"]),
            ("standalone", &["something-else"]),
        ]);
        let installed = vec![
            "target".to_string(),
            "other".to_string(),
            "standalone".to_string(),
        ];
        let dependents = dependents_of(&graph, "target", &installed);
        assert_eq!(dependents, vec!["other"]);
    }

    #[test]
    fn dependents_empty_when_target_has_no_requirements() {
        let graph = FakeGraph::new(&[("other", &["lib"])]);
        let installed = vec!["target".to_string(), "other".to_string()];
        assert!(dependents_of(&graph, "target", &installed).is_empty());
    }
}
