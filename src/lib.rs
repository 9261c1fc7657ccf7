//! 파일 열기/저장 다이얼로그의 파일 목록과 폴더 트리 뷰모델
//!
//! 렌더링과 실제 파일 작업은 호스트가 담당하고, 이 크레이트는 선택/정렬/
//! 클립보드/트리 탐색 상태만 관리합니다. 실제 작업은 [`system::backend::FileBackend`]로
//! 위임합니다.

pub mod app;
pub mod config;
pub mod core;
pub mod models;
pub mod system;
pub mod utils;

pub use app::{DialogEvent, FileListViewModel, FolderTreeViewModel};
pub use config::DialogConfig;
pub use core::{Action, Clipboard, ClipboardOperation, InputFocus};
pub use models::{EntryId, FileEntry, FolderInfo, FolderTree, NodeId, SortField, SortSpec, SortState};
pub use system::backend::{BackendError, FileBackend};
pub use utils::error::{OpenSaveError, Result};
