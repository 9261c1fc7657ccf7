//! 다이얼로그 설정 (TOML)
//!
//! `~/.config/opensave/config.toml` (플랫폼별 설정 디렉토리)에서 읽습니다.
//! 파일이 없으면 기본값을 사용합니다.

use crate::models::SortField;
use crate::utils::error::{OpenSaveError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "opensave";
const CONFIG_FILE_NAME: &str = "config.toml";

/// 다이얼로그 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// 초기 파일 필터 (`"all"` 또는 정규식)
    pub default_filter: String,
    /// 새 폴더 자리표시자 이름
    pub new_folder_name: String,
    /// 폴더 변경 시 초기화되는 정렬 필드
    pub default_sort: SortField,
    /// 트리 한 단계 들여쓰기 폭 (열 단위)
    pub tree_indent: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            default_filter: "all".to_string(),
            new_folder_name: "New Folder".to_string(),
            default_sort: SortField::Name,
            tree_indent: 2,
        }
    }
}

impl DialogConfig {
    /// 기본 설정 파일 경로
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 기본 위치에서 로드 (없으면 기본값)
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 지정 경로에서 로드 (없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded dialog config");
        Ok(config)
    }

    /// TOML 문자열 파싱 및 검증
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DialogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_filter.trim().is_empty() {
            return Err(OpenSaveError::Config(
                "default_filter must not be empty".to_string(),
            ));
        }
        let name = self.new_folder_name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(OpenSaveError::Config(format!(
                "invalid new_folder_name: {:?}",
                self.new_folder_name
            )));
        }
        Ok(())
    }

    /// TOML 파일로 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| OpenSaveError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
