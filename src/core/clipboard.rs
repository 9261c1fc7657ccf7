//! 잘라내기/복사 클립보드
//!
//! 애플리케이션 세션 단위로 하나만 만들고, 목록/트리 뷰모델에 같은 핸들을
//! 넘겨 공유합니다. 마지막 `set`이 이기며 붙여넣기 후 비워집니다.

use crate::models::FileEntry;
use std::cell::RefCell;
use std::rc::Rc;

/// 클립보드 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOperation {
    /// 복사 → 붙여넣기 시 백엔드 copy
    Copy,
    /// 잘라내기 → 붙여넣기 시 백엔드 move
    Cut,
}

impl ClipboardOperation {
    pub fn name(&self) -> &'static str {
        match self {
            ClipboardOperation::Copy => "copy",
            ClipboardOperation::Cut => "cut",
        }
    }
}

#[derive(Debug, Default)]
struct ClipboardState {
    items: Option<Vec<FileEntry>>,
    operation: Option<ClipboardOperation>,
}

/// 공유 클립보드 핸들 (단일 스레드)
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    inner: Rc<RefCell<ClipboardState>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목과 작업 종류 저장. 빈 목록은 클립보드를 비움
    pub fn set(&self, items: Vec<FileEntry>, operation: ClipboardOperation) {
        let mut state = self.inner.borrow_mut();
        if items.is_empty() {
            *state = ClipboardState::default();
            return;
        }
        tracing::debug!(count = items.len(), op = operation.name(), "clipboard set");
        state.items = Some(items);
        state.operation = Some(operation);
    }

    /// 저장된 항목 (없으면 `None`)
    pub fn get(&self) -> Option<Vec<FileEntry>> {
        self.inner.borrow().items.clone()
    }

    pub fn operation(&self) -> Option<ClipboardOperation> {
        self.inner.borrow().operation
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_none()
    }

    pub fn clear(&self) {
        *self.inner.borrow_mut() = ClipboardState::default();
    }

    /// 내용을 꺼내고 비움 (붙여넣기용)
    pub fn take(&self) -> Option<(Vec<FileEntry>, ClipboardOperation)> {
        let mut state = self.inner.borrow_mut();
        let taken = std::mem::take(&mut *state);
        taken.items.zip(taken.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_between_handles() {
        let clipboard = Clipboard::new();
        let other = clipboard.clone();
        assert!(other.is_empty());

        clipboard.set(vec![FileEntry::file("a", "/a", "text")], ClipboardOperation::Cut);
        assert!(!other.is_empty());
        assert_eq!(other.operation(), Some(ClipboardOperation::Cut));
        assert_eq!(other.get().map(|items| items.len()), Some(1));
    }

    #[test]
    fn test_last_writer_wins() {
        let clipboard = Clipboard::new();
        clipboard.set(vec![FileEntry::file("a", "/a", "text")], ClipboardOperation::Cut);
        clipboard.set(vec![FileEntry::folder("b", "/b")], ClipboardOperation::Copy);

        assert_eq!(clipboard.operation(), Some(ClipboardOperation::Copy));
        assert_eq!(clipboard.get().unwrap()[0].name, "b");
    }

    #[test]
    fn test_take_clears() {
        let clipboard = Clipboard::new();
        clipboard.set(vec![FileEntry::file("a", "/a", "text")], ClipboardOperation::Copy);

        let (items, op) = clipboard.take().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(op, ClipboardOperation::Copy);
        assert!(clipboard.is_empty());
        assert_eq!(clipboard.operation(), None);
        assert!(clipboard.take().is_none());
    }

    #[test]
    fn test_empty_set_clears() {
        let clipboard = Clipboard::new();
        clipboard.set(vec![FileEntry::file("a", "/a", "text")], ClipboardOperation::Copy);
        clipboard.set(Vec::new(), ClipboardOperation::Cut);
        assert!(clipboard.is_empty());
        assert_eq!(clipboard.operation(), None);
    }
}
