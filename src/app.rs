//! 파일 열기/저장 다이얼로그 뷰모델
//!
//! 파일 목록과 폴더 트리 두 컴포넌트가 같은 [`Clipboard`]를 공유합니다.
//! 호스트에 알려야 할 일은 [`DialogEvent`]로 큐에 쌓이며, 호스트는
//! 입력 이벤트를 처리한 뒤 `drain_events`로 꺼내갑니다.

use crate::models::{FileEntry, FolderInfo};

mod file_list;
mod folder_tree;

pub use file_list::{ContextTarget, FileListViewModel, PendingRename};
pub use folder_tree::{compare_folders, FolderTreeViewModel};


/// 호스트 알림
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    /// 선택 변경 (현재 선택 스냅샷)
    Highlight(Vec<FileEntry>),
    /// 파일/폴더 열기 (더블 클릭, Enter)
    Open(FileEntry),
    /// 삭제 요청 (확인 후 호스트가 `confirm_delete` 호출)
    DeleteRequested(Vec<FileEntry>),
    /// 트리에서 폴더 선택
    FolderSelected(FolderInfo),
    /// 트리에서 폴더 삭제 요청
    FolderDeleteRequested(FolderInfo),
    /// 트리 폭 재계산 완료
    LayoutChanged { width: usize },
}

/// 이벤트 큐
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    events: Vec<DialogEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: DialogEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.events)
    }
}
