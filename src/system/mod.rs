// System Layer: 호스트 백엔드 계약
pub mod backend;

pub use backend::{BackendError, BackendResult, FileBackend};
