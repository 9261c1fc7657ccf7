//! 호스트 파일 백엔드 계약
//!
//! 실제 생성/이름 변경/이동/복사/삭제/폴더 열기는 호스트가 수행합니다.
//! 모든 호출은 비동기이며 성공 또는 실패 사유 두 가지 결과만 가집니다.

use crate::models::{FileEntry, FolderInfo};
use async_trait::async_trait;
use thiserror::Error;

/// 백엔드 실패 사유
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// 같은 이름이 이미 존재함 (사용자가 다른 이름으로 재시도 가능)
    #[error("File already exists: {path}")]
    FileCollision { path: String },

    /// 그 밖의 실패
    #[error("Operation failed: {0}")]
    Failed(String),
}

impl BackendError {
    pub fn is_collision(&self) -> bool {
        matches!(self, BackendError::FileCollision { .. })
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// 호스트 데이터 계층
///
/// 뷰모델은 단일 스레드 이벤트 루프에서 동작하므로 `Send`를 요구하지 않습니다.
#[async_trait(?Send)]
pub trait FileBackend {
    /// 새 폴더 생성 (`folder.path`는 최종 경로)
    async fn create_folder(&self, folder: &FileEntry) -> BackendResult<()>;

    /// 이름 변경
    async fn rename_file(&self, file: &FileEntry, new_path: &str) -> BackendResult<()>;

    /// `from` 항목들을 폴더 `to` 안으로 이동
    async fn move_files(&self, from: &[FileEntry], to: &FileEntry) -> BackendResult<()>;

    /// `from` 항목들을 폴더 `to` 안으로 복사
    async fn copy_files(&self, from: &[FileEntry], to: &FileEntry) -> BackendResult<()>;

    /// 삭제
    async fn delete_files(&self, files: &[FileEntry]) -> BackendResult<()>;

    /// 폴더를 열어 자식 폴더 목록을 돌려줌
    async fn open_folder(&self, folder: &FolderInfo) -> BackendResult<Vec<FolderInfo>>;

    /// 트리에서 폴더가 접힘. 펼침 상태를 따로 관리하지 않는 호스트는 구현하지 않아도 됨
    async fn close_folder(&self, _folder: &FolderInfo) -> BackendResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_kind() {
        let collision = BackendError::FileCollision {
            path: "/a/New Folder".to_string(),
        };
        assert!(collision.is_collision());
        assert!(!BackendError::Failed("denied".into()).is_collision());
        assert_eq!(collision.to_string(), "File already exists: /a/New Folder");
    }
}
