use std::fmt;
use std::time::SystemTime;

/// 파일 목록 항목 식별자
///
/// 목록 뷰모델이 항목을 받을 때 할당합니다. 선택/컨텍스트 대상/대기 작업은
/// 모두 이 값으로 항목을 가리킵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 항목 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// 폴더
    Folder,
    /// 파일 (백엔드가 알려준 종류 문자열, 예: "ktr", "txt")
    File(String),
}

impl EntryKind {
    /// 타입 컬럼 값 (`"folder"` 또는 파일 종류)
    pub fn type_label(&self) -> &str {
        match self {
            EntryKind::Folder => "folder",
            EntryKind::File(kind) => kind,
        }
    }
}

/// 파일 엔트리
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// 목록 내 식별자
    pub id: EntryId,
    /// 파일/폴더 이름
    pub name: String,
    /// 슬래시 구분 전체 경로
    pub path: String,
    /// 종류
    pub kind: EntryKind,
    /// 수정 시간
    pub date: Option<SystemTime>,
    /// 이름 편집 중 여부
    pub editing: bool,
    /// 아직 생성되지 않은 새 폴더 자리표시자 여부
    pub new: bool,
}

impl FileEntry {
    /// 폴더 엔트리 생성 (id는 목록에 추가될 때 다시 할당됨)
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(name, path, EntryKind::Folder)
    }

    /// 파일 엔트리 생성
    pub fn file(name: impl Into<String>, path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::with_kind(name, path, EntryKind::File(kind.into()))
    }

    fn with_kind(name: impl Into<String>, path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: EntryId(0),
            name: name.into(),
            path: path.into(),
            kind,
            date: None,
            editing: false,
            new: false,
        }
    }

    /// 수정 시간 지정
    pub fn with_date(mut self, date: SystemTime) -> Self {
        self.date = Some(date);
        self
    }

    /// 폴더 여부 확인
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// 아이콘 결정
    pub fn icon(&self) -> FileIcon {
        FileIcon::for_entry(self)
    }
}

/// 파일 아이콘
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Folder,
    Job,
    Trans,
    Image,
    Text,
    Blank,
}

impl FileIcon {
    /// 경로 확장자(소문자)로 아이콘 결정. 폴더는 항상 `Folder`
    pub fn for_entry(entry: &FileEntry) -> Self {
        if entry.is_folder() {
            return FileIcon::Folder;
        }
        // 점이 없으면 경로 전체가 확장자로 취급됨
        let extension = match entry.path.rfind('.') {
            Some(index) => &entry.path[index + 1..],
            None => entry.path.as_str(),
        };
        match extension.to_lowercase().as_str() {
            "kjb" => FileIcon::Job,
            "ktr" => FileIcon::Trans,
            "jpg" | "png" | "gif" => FileIcon::Image,
            "txt" | "csv" | "json" | "xml" => FileIcon::Text,
            _ => FileIcon::Blank,
        }
    }

    /// 아이콘 이름
    pub fn name(&self) -> &'static str {
        match self {
            FileIcon::Folder => "folder",
            FileIcon::Job => "job",
            FileIcon::Trans => "trans",
            FileIcon::Image => "image",
            FileIcon::Text => "text",
            FileIcon::Blank => "blank",
        }
    }

    /// 아이콘 이미지 경로
    pub fn asset_path(&self) -> String {
        format!("./img/file_icons/{}.svg", self.name())
    }
}

/// 경로의 부모 디렉토리 (마지막 `/` 앞부분)
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

/// 같은 디렉토리 안에서 이름만 바꾼 경로
///
/// # Examples
/// ```
/// use opensave::models::file_entry::sibling_path;
///
/// assert_eq!(sibling_path("/home/user/old.txt", "new.txt"), "/home/user/new.txt");
/// assert_eq!(sibling_path("/old", "new"), "/new");
/// ```
pub fn sibling_path(path: &str, new_name: &str) -> String {
    format!("{}/{}", parent_dir(path), new_name)
}

/// 디렉토리 아래 자식 경로 (루트 `/`는 중복 슬래시 없이)
pub fn child_path(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}
