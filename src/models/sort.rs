//! 파일 목록 정렬 상태와 비교 함수

use crate::models::file_entry::FileEntry;
use crate::utils::natural::natural_cmp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// 이름
    #[default]
    Name,
    /// 타입
    Type,
    /// 수정 날짜
    Date,
}

/// 정렬 상태
///
/// `None → Ascending → Descending → Ascending → …`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    /// 헤더를 누르지 않은 초기 상태
    #[default]
    None,
    /// 오름차순
    Ascending,
    /// 내림차순
    Descending,
}

impl SortState {
    /// 숫자 표현 (0: none, 1: ascending, 2: descending)
    pub fn code(&self) -> u8 {
        match self {
            SortState::None => 0,
            SortState::Ascending => 1,
            SortState::Descending => 2,
        }
    }
}

/// 정렬 지정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub state: SortState,
    pub field: SortField,
}

impl SortSpec {
    pub fn new(state: SortState, field: SortField) -> Self {
        Self { state, field }
    }

    /// 헤더 클릭
    ///
    /// 다른 필드를 누르면 상태가 `None`으로 초기화된 뒤 같은 클릭으로 한 번 진행되므로
    /// 결과적으로 새 필드의 오름차순이 됩니다.
    pub fn click(&mut self, field: SortField) {
        if self.field != field {
            self.state = SortState::None;
        }
        self.state = match self.state {
            SortState::None | SortState::Descending => SortState::Ascending,
            SortState::Ascending => SortState::Descending,
        };
        self.field = field;
    }

    /// 내림차순 여부
    pub fn is_reversed(&self) -> bool {
        self.state == SortState::Descending
    }
}

/// 폴더 우선 비교
fn folders_first(a: &FileEntry, b: &FileEntry) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn compare_field(a: &FileEntry, b: &FileEntry, field: SortField) -> Ordering {
    match field {
        SortField::Name => natural_cmp(&a.name, &b.name),
        SortField::Type => a
            .kind
            .type_label()
            .cmp(b.kind.type_label())
            .then_with(|| natural_cmp(&a.name, &b.name)),
        SortField::Date => a
            .date
            .cmp(&b.date)
            .then_with(|| natural_cmp(&a.name, &b.name)),
    }
}

/// 두 항목 비교
///
/// 1. 폴더가 항상 파일보다 먼저 (내림차순에서도 유지)
/// 2. 정렬 필드 비교 (내림차순이면 이 단계만 뒤집힘)
/// 3. 원래 순서(`index`)로 안정 정렬
pub fn compare_entries(
    (index_a, a): (usize, &FileEntry),
    (index_b, b): (usize, &FileEntry),
    spec: SortSpec,
) -> Ordering {
    let ord = folders_first(a, b);
    if ord != Ordering::Equal {
        return ord;
    }
    let ord = compare_field(a, b, spec.field);
    let ord = if spec.is_reversed() { ord.reverse() } else { ord };
    ord.then(index_a.cmp(&index_b))
}

/// 항목 정렬 (입력 순서가 원래 인덱스)
pub fn sort_entries<'a, I>(entries: I, spec: SortSpec) -> Vec<&'a FileEntry>
where
    I: IntoIterator<Item = &'a FileEntry>,
{
    let mut indexed: Vec<(usize, &FileEntry)> = entries.into_iter().enumerate().collect();
    indexed.sort_by(|&a, &b| compare_entries(a, b, spec));
    indexed.into_iter().map(|(_, entry)| entry).collect()
}
