//! 폴더 트리 뷰모델
//!
//! 펼침/접힘, 폴더 선택, 경로 기반 탐색과 펼치기, 트리 쪽 붙여넣기를 담당합니다.

use super::{DialogEvent, EventQueue};
use crate::config::DialogConfig;
use crate::core::clipboard::{Clipboard, ClipboardOperation};
use crate::models::folder_tree::{split_path, FolderInfo, FolderNode, FolderTree, NodeId};
use crate::models::FileEntry;
use crate::system::backend::{BackendResult, FileBackend};
use crate::utils::natural::natural_cmp;
use std::cmp::Ordering;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

/// 폴더 경로 비교
///
/// `/`로 나눈 구간을 자연 정렬로 앞에서부터 비교하고, 공통 구간이 같으면 짧은
/// 경로가 먼저, 그것도 같으면 원래 순서를 따릅니다. 한쪽이라도 경로가 없으면 같다고
/// 봅니다.
pub fn compare_folders(
    (index_a, a): (usize, Option<&str>),
    (index_b, b): (usize, Option<&str>),
) -> Ordering {
    let (Some(a), Some(b)) = (a.filter(|p| !p.is_empty()), b.filter(|p| !p.is_empty())) else {
        return Ordering::Equal;
    };
    let parts_a: Vec<&str> = a.split('/').collect();
    let parts_b: Vec<&str> = b.split('/').collect();
    parts_a
        .iter()
        .zip(&parts_b)
        .map(|(x, y)| natural_cmp(x, y))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or_else(|| parts_a.len().cmp(&parts_b.len()))
        .then(index_a.cmp(&index_b))
}

/// 폴더 트리 뷰모델
#[derive(Debug)]
pub struct FolderTreeViewModel {
    config: DialogConfig,
    clipboard: Clipboard,
    tree: FolderTree,
    selected: Option<NodeId>,
    /// 마지막으로 우클릭한 폴더
    target_folder: Option<NodeId>,
    /// 호스트가 따로 불러 둔 선택 폴더 (자식 포함)
    host_selection: Option<FolderInfo>,
    width: usize,
    events: EventQueue,
}

impl FolderTreeViewModel {
    pub fn new(tree: FolderTree, clipboard: Clipboard, config: DialogConfig) -> Self {
        let mut vm = Self {
            config,
            clipboard,
            tree,
            selected: None,
            target_folder: None,
            host_selection: None,
            width: 0,
            events: EventQueue::default(),
        };
        vm.width = vm.compute_width();
        vm
    }

    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> Option<&FolderNode> {
        self.tree.get(id)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn target_folder(&self) -> Option<NodeId> {
        self.target_folder
    }

    /// 트리 영역 폭 (가장 넓은 보이는 행)
    pub fn width(&self) -> usize {
        self.width
    }

    /// 폴더 선택
    pub fn select(&mut self, id: NodeId) {
        let Some(info) = self.tree.to_info(id) else {
            return;
        };
        self.selected = Some(id);
        debug!(path = %info.path, "folder selected");
        self.events.push(DialogEvent::FolderSelected(info));
    }

    /// 펼침 토글
    ///
    /// 펼칠 때는 백엔드에서 자식을 불러오고, 완료 후 트리 폭을 다시 계산합니다.
    /// 불러오기에 실패하면 다시 접힌 상태로 돌아갑니다. 접을 때도 백엔드에 알린 뒤
    /// 폭을 다시 계산합니다.
    pub async fn toggle_open<B>(&mut self, id: NodeId, backend: &B) -> BackendResult<()>
    where
        B: FileBackend + ?Sized,
    {
        let Some(node) = self.tree.get_mut(id) else {
            return Ok(());
        };
        node.open = !node.open;
        let opening = node.open;
        node.loading = opening;
        let info = FolderInfo {
            children: Vec::new(),
            ..self.tree.to_info(id).unwrap_or_default()
        };

        if !opening {
            let result = backend.close_folder(&info).await;
            if let Err(err) = &result {
                warn!(path = %info.path, %err, "close notification failed");
            }
            self.relayout();
            return result;
        }

        let result = backend.open_folder(&info).await;

        if !self.tree.contains(id) {
            debug!(path = %info.path, "folder detached before open completed");
            return result.map(|_| ());
        }
        match result {
            Ok(children) => {
                self.tree.replace_children(id, &children);
                if let Some(node) = self.tree.get_mut(id) {
                    node.loading = false;
                }
                debug!(path = %info.path, count = children.len(), "folder opened");
                self.relayout();
                Ok(())
            }
            Err(err) => {
                if let Some(node) = self.tree.get_mut(id) {
                    node.open = false;
                    node.loading = false;
                }
                warn!(path = %info.path, %err, "failed to open folder");
                Err(err)
            }
        }
    }

    /// 선택 후 펼침 토글
    pub async fn select_and_open<B>(&mut self, id: NodeId, backend: &B) -> BackendResult<()>
    where
        B: FileBackend + ?Sized,
    {
        self.select(id);
        self.toggle_open(id, backend).await
    }

    /// 경로로 폴더 찾기
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.tree.find_by_path(path)
    }

    /// 경로까지 조상 폴더를 루트부터 차례로 펼친 뒤 대상 폴더를 선택
    ///
    /// 각 조상은 펼치기가 끝난 후에 다음 구간을 찾습니다. 이미 펼쳐진 조상은 그대로
    /// 둡니다. 호스트가 같은 경로의 폴더를 이미 불러 두었다면 그 자식을 씁니다.
    pub async fn open_path<B>(&mut self, path: &str, backend: &B) -> BackendResult<Option<NodeId>>
    where
        B: FileBackend + ?Sized,
    {
        let parts = split_path(path);
        let mut level: Vec<NodeId> = self.tree.roots().to_vec();
        let ancestors = parts.len().saturating_sub(1);

        for part in &parts[..ancestors] {
            let Some(id) = self.tree.find_child(&level, part) else {
                debug!(%path, segment = %part, "path segment not found");
                return Ok(None);
            };
            if !self.tree.get(id).is_some_and(|node| node.open) {
                self.toggle_open(id, backend).await?;
            }
            level = match self.tree.get(id) {
                Some(node) => node.children().to_vec(),
                None => return Ok(None),
            };
        }

        let Some(target) = self.tree.find_by_path(path) else {
            return Ok(None);
        };
        if let Some(loaded) = self.host_selection.take() {
            if same_path(&loaded.path, path) {
                self.tree.replace_children(target, &loaded.children);
                self.relayout();
            } else {
                self.host_selection = Some(loaded);
            }
        }
        self.select(target);
        info!(%path, "path opened");
        Ok(Some(target))
    }

    /// 호스트 쪽에서 선택된 폴더 반영 (폭 재계산 포함)
    pub fn set_selected_folder(&mut self, folder: FolderInfo) {
        self.host_selection = Some(folder);
        self.relayout();
    }

    /// 자식 폴더를 경로 순서로 정렬
    pub fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.tree.get(id) else {
            return Vec::new();
        };
        let mut indexed: Vec<(usize, NodeId, Option<&str>)> = node
            .children()
            .iter()
            .enumerate()
            .map(|(index, &child)| {
                let path = self.tree.get(child).map(|n| n.path.as_str());
                (index, child, path)
            })
            .collect();
        indexed.sort_by(|a, b| compare_folders((a.0, a.2), (b.0, b.2)));
        indexed.into_iter().map(|(_, id, _)| id).collect()
    }

    /// 우클릭
    pub fn right_click(&mut self, id: NodeId) {
        self.target_folder = Some(id);
    }

    /// 메뉴 "폴더 삭제"
    pub fn delete_target(&mut self) {
        let Some(info) = self.target_folder.and_then(|id| self.tree.to_info(id)) else {
            return;
        };
        self.events.push(DialogEvent::FolderDeleteRequested(info));
    }

    /// 트리 노드는 항상 폴더이므로 클립보드만 확인
    pub fn can_paste(&self) -> bool {
        !self.clipboard.is_empty()
    }

    /// 메뉴 "잘라내기"/"복사": 대상 폴더를 클립보드에
    pub fn cut_target(&mut self) {
        self.set_clipboard(ClipboardOperation::Cut);
    }

    pub fn copy_target(&mut self) {
        self.set_clipboard(ClipboardOperation::Copy);
    }

    fn set_clipboard(&mut self, operation: ClipboardOperation) {
        if let Some(entry) = self.target_entry() {
            self.clipboard.set(vec![entry], operation);
        }
    }

    fn target_entry(&self) -> Option<FileEntry> {
        self.target_folder
            .and_then(|id| self.tree.get(id))
            .map(FolderNode::to_entry)
    }

    /// 마지막으로 우클릭한 폴더에 붙여넣기
    pub async fn paste<B>(&mut self, backend: &B) -> BackendResult<bool>
    where
        B: FileBackend + ?Sized,
    {
        let Some(destination) = self.target_entry() else {
            return Ok(false);
        };
        let Some((items, operation)) = self.clipboard.take() else {
            return Ok(false);
        };
        let result = match operation {
            ClipboardOperation::Copy => backend.copy_files(&items, &destination).await,
            ClipboardOperation::Cut => backend.move_files(&items, &destination).await,
        };
        match &result {
            Ok(()) => info!(
                count = items.len(),
                op = operation.name(),
                to = %destination.path,
                "pasted into folder"
            ),
            Err(err) => warn!(op = operation.name(), %err, "paste into folder failed"),
        }
        result.map(|()| true)
    }

    /// 드래그 앤 드롭: 항목들을 트리 폴더로 이동
    pub async fn drop_onto<B>(&mut self, from: &[FileEntry], to: NodeId, backend: &B) -> BackendResult<bool>
    where
        B: FileBackend + ?Sized,
    {
        let Some(destination) = self.tree.get(to).map(FolderNode::to_entry) else {
            return Ok(false);
        };
        let items: Vec<FileEntry> = from
            .iter()
            .filter(|item| item.path != destination.path)
            .cloned()
            .collect();
        if items.is_empty() {
            return Ok(false);
        }
        backend.move_files(&items, &destination).await?;
        Ok(true)
    }

    fn compute_width(&self) -> usize {
        self.tree
            .visible_rows()
            .into_iter()
            .filter_map(|(id, depth)| {
                self.tree
                    .get(id)
                    .map(|node| depth * self.config.tree_indent + node.name.width())
            })
            .max()
            .unwrap_or(0)
    }

    fn relayout(&mut self) {
        self.width = self.compute_width();
        self.events.push(DialogEvent::LayoutChanged { width: self.width });
    }

    /// 쌓인 호스트 알림 꺼내기
    pub fn drain_events(&mut self) -> Vec<DialogEvent> {
        self.events.drain()
    }
}

/// 루트는 `/`와 빈 문자열을 같게 봄
fn same_path(a: &str, b: &str) -> bool {
    let normalize = |p: &str| p.trim_end_matches('/').to_string();
    normalize(a) == normalize(b)
}
