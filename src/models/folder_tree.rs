//! 폴더 트리 (아레나)
//!
//! 노드는 `NodeId`로 참조되며 부모 링크를 가집니다. 자식 목록을 교체하면
//! 이전 하위 트리는 분리(detach)되고, 분리된 노드의 id는 재사용되지 않습니다.

use crate::models::file_entry::FileEntry;
use std::fmt;

/// 트리 노드 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// 호스트가 넘겨주는 폴더 설명 (중첩 구조)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderInfo {
    pub name: String,
    pub path: String,
    pub provider: String,
    pub connection: String,
    pub has_children: bool,
    pub children: Vec<FolderInfo>,
}

impl FolderInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            has_children: true,
            ..Default::default()
        }
    }

    /// 제공자/연결 지정
    pub fn on(mut self, provider: impl Into<String>, connection: impl Into<String>) -> Self {
        self.provider = provider.into();
        self.connection = connection.into();
        self
    }

    /// 자식 지정
    pub fn with_children(mut self, children: Vec<FolderInfo>) -> Self {
        self.children = children;
        self
    }
}

/// 트리 노드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
    pub path: String,
    pub provider: String,
    pub connection: String,
    pub has_children: bool,
    /// 펼침 여부
    pub open: bool,
    /// 자식 로딩 중 (펼친 상태에서만 의미 있음)
    pub loading: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl FolderNode {
    fn from_info(info: &FolderInfo, parent: Option<NodeId>) -> Self {
        Self {
            name: info.name.clone(),
            path: info.path.clone(),
            provider: info.provider.clone(),
            connection: info.connection.clone(),
            has_children: info.has_children,
            open: false,
            loading: false,
            parent,
            children: Vec::new(),
        }
    }

    /// 트리 전체에서 유일한 키 (`provider:connection:path`)
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.provider, self.connection, self.path)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// 백엔드 작업 대상용 엔트리 표현
    pub fn to_entry(&self) -> FileEntry {
        FileEntry::folder(self.name.clone(), self.path.clone())
    }
}

/// 폴더 트리
#[derive(Debug, Clone, Default)]
pub struct FolderTree {
    slots: Vec<Option<FolderNode>>,
    roots: Vec<NodeId>,
}

impl FolderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// 최상위 노드 목록으로 트리 생성
    pub fn from_roots(roots: Vec<FolderInfo>) -> Self {
        let mut tree = Self::new();
        for root in &roots {
            tree.add_root(root);
        }
        tree
    }

    /// 최상위 노드 추가. 첫 번째 최상위 노드의 이름은 `/`로 고정
    pub fn add_root(&mut self, info: &FolderInfo) -> NodeId {
        let id = self.insert_subtree(None, info);
        self.roots.push(id);
        if self.roots.len() == 1 {
            if let Some(node) = self.get_mut(id) {
                node.name = "/".to_string();
            }
        }
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&FolderNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut FolderNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// 노드가 아직 트리에 붙어 있는지 확인
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn alloc(&mut self, node: FolderNode) -> NodeId {
        self.slots.push(Some(node));
        NodeId(self.slots.len() - 1)
    }

    fn insert_subtree(&mut self, parent: Option<NodeId>, info: &FolderInfo) -> NodeId {
        let id = self.alloc(FolderNode::from_info(info, parent));
        let children: Vec<NodeId> = info
            .children
            .iter()
            .map(|child| self.insert_subtree(Some(id), child))
            .collect();
        if let Some(node) = self.get_mut(id) {
            node.children = children;
        }
        id
    }

    fn release(&mut self, id: NodeId) {
        let Some(node) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        for child in node.children {
            self.release(child);
        }
    }

    /// 자식 목록 교체 (이전 하위 트리는 분리)
    pub fn replace_children(&mut self, id: NodeId, children: &[FolderInfo]) -> bool {
        let Some(old) = self.get_mut(id).map(|node| std::mem::take(&mut node.children)) else {
            return false;
        };
        for child in old {
            self.release(child);
        }
        let new_children: Vec<NodeId> = children
            .iter()
            .map(|child| self.insert_subtree(Some(id), child))
            .collect();
        if let Some(node) = self.get_mut(id) {
            node.children = new_children;
        }
        true
    }

    /// 노드와 하위 트리 제거
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).map(FolderNode::parent) else {
            return false;
        };
        match parent.and_then(|p| self.get_mut(p)) {
            Some(parent_node) => parent_node.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
        self.release(id);
        true
    }

    /// 루트로부터의 깊이 (최상위 노드는 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).and_then(FolderNode::parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).and_then(FolderNode::parent);
        }
        depth
    }

    /// 화면에 보이는 행 목록 (펼친 노드의 자식만 포함), `(id, depth)`
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            rows.push((id, depth));
            if node.open {
                stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        rows
    }

    /// 이름으로 자식 찾기 (선형 탐색)
    pub fn find_child(&self, siblings: &[NodeId], name: &str) -> Option<NodeId> {
        siblings
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|node| node.name == name))
    }

    /// 슬래시 경로로 노드 찾기. 없으면 `None`
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        let parts = split_path(path);
        let mut level: &[NodeId] = &self.roots;
        let mut found = None;
        for part in &parts {
            let id = self.find_child(level, part)?;
            level = self.get(id).map(FolderNode::children)?;
            found = Some(id);
        }
        found
    }

    /// 호스트 표현으로 스냅샷 (하위 트리 포함)
    pub fn to_info(&self, id: NodeId) -> Option<FolderInfo> {
        let node = self.get(id)?;
        Some(FolderInfo {
            name: node.name.clone(),
            path: node.path.clone(),
            provider: node.provider.clone(),
            connection: node.connection.clone(),
            has_children: node.has_children,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.to_info(child))
                .collect(),
        })
    }
}

/// 경로를 트리 탐색용 구간으로 분할
///
/// 첫 구간은 항상 `/`(최상위 노드)이며 끝의 `/`는 무시합니다.
///
/// # Examples
/// ```
/// use opensave::models::folder_tree::split_path;
///
/// assert_eq!(split_path("/"), vec!["/"]);
/// assert_eq!(split_path("/a/b"), vec!["/", "a", "b"]);
/// assert_eq!(split_path("/a/b/"), vec!["/", "a", "b"]);
/// ```
pub fn split_path(path: &str) -> Vec<String> {
    let trimmed = path.trim_end_matches('/');
    let mut parts: Vec<String> = trimmed.split('/').map(str::to_string).collect();
    parts[0] = "/".to_string();
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FolderTree {
        FolderTree::from_roots(vec![FolderInfo::new("root", "/").with_children(vec![
            FolderInfo::new("a", "/a").with_children(vec![FolderInfo::new("c", "/a/c")]),
            FolderInfo::new("b", "/b"),
        ])])
    }

    fn name(tree: &FolderTree, id: Option<NodeId>) -> Option<&str> {
        id.and_then(|id| tree.get(id)).map(|n| n.name.as_str())
    }

    #[test]
    fn test_first_root_relabeled() {
        let tree = sample();
        assert_eq!(name(&tree, tree.roots().first().copied()), Some("/"));
    }

    #[test]
    fn test_find_by_path() {
        let tree = sample();
        assert_eq!(name(&tree, tree.find_by_path("/")), Some("/"));
        assert_eq!(name(&tree, tree.find_by_path("/a")), Some("a"));
        assert_eq!(name(&tree, tree.find_by_path("/a/c")), Some("c"));
        assert_eq!(name(&tree, tree.find_by_path("/b/")), Some("b"));
        assert_eq!(tree.find_by_path("/missing"), None);
        assert_eq!(tree.find_by_path("/a/missing"), None);
        assert_eq!(tree.find_by_path("/b/c"), None);
    }

    #[test]
    fn test_find_in_empty_tree() {
        assert_eq!(FolderTree::new().find_by_path("/a"), None);
    }

    #[test]
    fn test_split_path_forces_first_segment() {
        assert_eq!(split_path(""), vec!["/"]);
        assert_eq!(split_path("a/b"), vec!["/", "b"]);
    }

    #[test]
    fn test_replace_children_detaches_old_subtree() {
        let mut tree = sample();
        let a = tree.find_by_path("/a").unwrap();
        let c = tree.find_by_path("/a/c").unwrap();

        assert!(tree.replace_children(a, &[FolderInfo::new("d", "/a/d")]));
        assert!(!tree.contains(c));
        assert_eq!(name(&tree, tree.find_by_path("/a/d")), Some("d"));
        assert_eq!(tree.find_by_path("/a/c"), None);
    }

    #[test]
    fn test_remove_and_depth() {
        let mut tree = sample();
        let c = tree.find_by_path("/a/c").unwrap();
        assert_eq!(tree.depth(c), 2);

        let a = tree.find_by_path("/a").unwrap();
        assert!(tree.remove(a));
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.remove(a));
        assert_eq!(tree.find_by_path("/b").map(|b| tree.depth(b)), Some(1));
    }

    #[test]
    fn test_visible_rows_follow_open_state() {
        let mut tree = sample();
        let root = tree.roots()[0];
        assert_eq!(tree.visible_rows().len(), 1);

        tree.get_mut(root).unwrap().open = true;
        let rows: Vec<usize> = tree.visible_rows().iter().map(|&(_, d)| d).collect();
        assert_eq!(rows, vec![0, 1, 1]);

        let a = tree.find_by_path("/a").unwrap();
        tree.get_mut(a).unwrap().open = true;
        let names: Vec<&str> = tree
            .visible_rows()
            .iter()
            .map(|&(id, _)| tree.get(id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["/", "a", "c", "b"]);
    }

    #[test]
    fn test_node_key_and_snapshot() {
        let tree = FolderTree::from_roots(vec![FolderInfo::new("r", "/")
            .on("vfs", "s3")
            .with_children(vec![FolderInfo::new("x", "/x").on("vfs", "s3")])]);
        let x = tree.find_by_path("/x").unwrap();
        assert_eq!(tree.get(x).unwrap().key(), "vfs:s3:/x");

        let info = tree.to_info(tree.roots()[0]).unwrap();
        assert_eq!(info.name, "/");
        assert_eq!(info.children.len(), 1);
    }
}
