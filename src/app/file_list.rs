//! 파일 목록 뷰모델
//!
//! 필터/정렬된 목록, 다중 선택, 인라인 이름 변경과 새 폴더 생성,
//! 컨텍스트 메뉴 대상, 클립보드 잘라내기/복사/붙여넣기를 담당합니다.

use super::{DialogEvent, EventQueue};
use crate::config::DialogConfig;
use crate::core::actions::{action_for_event, Action, InputFocus};
use crate::core::clipboard::{Clipboard, ClipboardOperation};
use crate::models::file_entry::{child_path, sibling_path, EntryId, FileEntry, FileIcon};
use crate::models::sort::{sort_entries, SortField, SortSpec, SortState};
use crate::system::backend::{BackendResult, FileBackend};
use crate::utils::filter::FileFilter;
use crate::utils::formatter::format_optional_date;
use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

/// 현재 폴더 자신에게 쓰는 id (목록 항목은 1부터 할당)
const CURRENT_FOLDER_ID: EntryId = EntryId(0);

/// 컨텍스트 메뉴 대상
///
/// 선택(selection)과 별개로 관리됩니다. 우클릭한 항목이 선택 밖이면 그 항목만,
/// 선택 안이면 선택 전체, 빈 공간이면 현재 폴더가 대상입니다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContextTarget {
    #[default]
    None,
    /// 빈 공간 우클릭
    CurrentFolder,
    Entries(Vec<EntryId>),
}

/// 백엔드 응답을 기다리는 이름 변경/생성
#[derive(Debug, Clone, PartialEq)]
pub enum PendingRename {
    /// 새 폴더 자리표시자 생성
    Create { id: EntryId, folder: FileEntry },
    /// 기존 항목 이름 변경 (이름은 이미 낙관적으로 바뀐 상태)
    Rename {
        id: EntryId,
        file: FileEntry,
        new_path: String,
        previous: String,
    },
}

impl PendingRename {
    pub fn id(&self) -> EntryId {
        match self {
            PendingRename::Create { id, .. } | PendingRename::Rename { id, .. } => *id,
        }
    }
}

/// 파일 목록 뷰모델
#[derive(Debug)]
pub struct FileListViewModel {
    config: DialogConfig,
    clipboard: Clipboard,
    /// 현재 폴더
    folder: FileEntry,
    /// 현재 폴더의 자식 (받은 순서 유지)
    entries: Vec<FileEntry>,
    filter_pattern: String,
    filter: FileFilter,
    sort: SortSpec,
    selection: Vec<EntryId>,
    context: ContextTarget,
    next_id: u64,
    events: EventQueue,
}

impl FileListViewModel {
    pub fn new(folder: FileEntry, clipboard: Clipboard, config: DialogConfig) -> Self {
        let filter = FileFilter::parse(&config.default_filter);
        Self {
            filter_pattern: config.default_filter.clone(),
            filter,
            sort: SortSpec::new(SortState::None, config.default_sort),
            config,
            clipboard,
            folder: FileEntry {
                id: CURRENT_FOLDER_ID,
                ..folder
            },
            entries: Vec::new(),
            selection: Vec::new(),
            context: ContextTarget::None,
            next_id: 1,
            events: EventQueue::default(),
        }
    }

    fn alloc_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn folder(&self) -> &FileEntry {
        &self.folder
    }

    /// 필터 적용 전 전체 항목
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: EntryId) -> Option<&mut FileEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// 항목 교체
    ///
    /// 각 항목에 새 id를 할당하고, 기존 선택은 경로가 같은 새 항목으로 옮깁니다.
    /// 반환값은 필터를 통과한 항목 (폴더는 항상 포함).
    pub fn set_entries(&mut self, entries: Vec<FileEntry>, filter_pattern: &str) -> Vec<&FileEntry> {
        let selected_paths: Vec<String> = self.selection().iter().map(|e| e.path.clone()).collect();

        let mut assigned = Vec::with_capacity(entries.len());
        for mut entry in entries {
            entry.id = self.alloc_id();
            assigned.push(entry);
        }
        self.entries = assigned;

        if filter_pattern != self.filter_pattern {
            self.filter_pattern = filter_pattern.to_string();
            self.filter = FileFilter::parse(filter_pattern);
        }

        self.selection = selected_paths
            .iter()
            .filter_map(|path| self.entries.iter().find(|e| &e.path == path))
            .map(|e| e.id)
            .collect();
        self.context = ContextTarget::None;

        debug!(
            count = self.entries.len(),
            filter = %self.filter_pattern,
            "entries updated"
        );
        self.visible()
    }

    /// 필터만 변경
    pub fn set_filter(&mut self, filter_pattern: &str) {
        self.filter_pattern = filter_pattern.to_string();
        self.filter = FileFilter::parse(filter_pattern);
    }

    pub fn filter_pattern(&self) -> &str {
        &self.filter_pattern
    }

    /// 필터를 통과한 항목 (받은 순서)
    pub fn visible(&self) -> Vec<&FileEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_folder() || self.filter.accepts(&e.name, &e.path))
            .collect()
    }

    /// 화면 표시 순서
    pub fn sorted(&self) -> Vec<&FileEntry> {
        sort_entries(self.visible(), self.sort)
    }

    /// 폴더 이동: 선택 초기화, 정렬 초기화 후 새 항목 적용
    pub fn change_folder(&mut self, folder: FileEntry, entries: Vec<FileEntry>) {
        self.folder = FileEntry {
            id: CURRENT_FOLDER_ID,
            ..folder
        };
        self.selection.clear();
        self.sort = SortSpec::new(SortState::None, self.config.default_sort);
        let pattern = self.filter_pattern.clone();
        self.set_entries(entries, &pattern);
        info!(path = %self.folder.path, "folder changed");
    }

    /// 정렬 헤더 클릭
    pub fn sort_by(&mut self, field: SortField) {
        self.sort.click(field);
        debug!(?field, state = self.sort.state.code(), "sort changed");
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    /// 항목 클릭
    ///
    /// - ctrl: 선택 토글
    /// - shift: 첫 선택 항목(없으면 맨 앞)부터 클릭 항목까지 정렬 순서로 추가
    /// - 그 외: 클릭 항목 하나만 선택 (이미 그 항목만 선택돼 있으면 유지)
    ///
    /// 목록에 없는 id면 선택은 그대로 두지만 하이라이트 알림은 항상 보냅니다.
    pub fn select(&mut self, id: EntryId, shift: bool, ctrl: bool) {
        if self.entry(id).is_none() {
            debug!(%id, "select on unknown entry");
        } else if ctrl {
            match self.selection.iter().position(|&s| s == id) {
                Some(index) => {
                    self.selection.remove(index);
                }
                None => self.selection.push(id),
            }
        } else if shift {
            self.extend_selection(id);
        } else if !(self.selection.len() == 1 && self.selection[0] == id) {
            self.selection = vec![id];
        }
        self.emit_highlight();
    }

    fn extend_selection(&mut self, id: EntryId) {
        let sorted: Vec<EntryId> = self.sorted().iter().map(|e| e.id).collect();
        let Some(end) = sorted.iter().position(|&s| s == id) else {
            return;
        };
        let start = self
            .selection
            .first()
            .and_then(|first| sorted.iter().position(|s| s == first))
            .unwrap_or(0);

        let run: Vec<EntryId> = if start <= end {
            sorted[start..=end].to_vec()
        } else {
            sorted[end..=start].iter().rev().copied().collect()
        };
        for candidate in run {
            if !self.selection.contains(&candidate) {
                self.selection.push(candidate);
            }
        }
    }

    /// 선택 해제
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.emit_highlight();
    }

    /// 보이는 항목 전체 선택
    pub fn select_all(&mut self) {
        self.selection = self.visible().iter().map(|e| e.id).collect();
        self.emit_highlight();
    }

    pub fn is_selected(&self, id: EntryId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selected_ids(&self) -> &[EntryId] {
        &self.selection
    }

    /// 선택 항목 (선택한 순서)
    pub fn selection(&self) -> Vec<&FileEntry> {
        self.selection.iter().filter_map(|&id| self.entry(id)).collect()
    }

    fn selection_snapshot(&self) -> Vec<FileEntry> {
        self.selection().into_iter().cloned().collect()
    }

    fn emit_highlight(&mut self) {
        let snapshot = self.selection_snapshot();
        self.events.push(DialogEvent::Highlight(snapshot));
    }

    /// 더블 클릭/Enter: 편집 중이 아니면 열기
    pub fn commit(&mut self, id: EntryId) {
        let Some(entry) = self.entry(id) else {
            return;
        };
        if !entry.editing {
            let entry = entry.clone();
            self.events.push(DialogEvent::Open(entry));
        }
    }

    /// 편집 시작: 새 폴더 자리표시자는 단독 선택
    pub fn start_edit(&mut self, id: EntryId) {
        if self.entry(id).is_some_and(|e| e.new) {
            self.select(id, false, false);
        }
    }

    /// 새 폴더 자리표시자 추가 (편집 상태로 선택됨)
    pub fn add_folder(&mut self) -> EntryId {
        let name = self.unique_name(&self.config.new_folder_name);
        let mut entry = FileEntry::folder(name.clone(), child_path(&self.folder.path, &name));
        entry.id = self.alloc_id();
        entry.new = true;
        entry.editing = true;
        let id = entry.id;
        self.entries.push(entry);
        self.start_edit(id);
        debug!(%id, %name, "placeholder folder added");
        id
    }

    fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.entries.iter().any(|e| e.name == name);
        if !taken(base) {
            return base.to_string();
        }
        (2u32..)
            .map(|n| format!("{} {}", base, n))
            .find(|candidate| !taken(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    /// 인라인 편집 확정 (1단계)
    ///
    /// 새 폴더면 이름/경로를 확정하고 생성 요청을, 기존 항목이면 이름을
    /// 낙관적으로 바꾸고 이름 변경 요청을 만듭니다. 빈 이름이나 변경 없음은 `None`.
    pub fn begin_rename(
        &mut self,
        id: EntryId,
        new_name: &str,
        previous: &str,
    ) -> Option<PendingRename> {
        if new_name.is_empty() {
            return None;
        }
        let entry = self.entry_mut(id)?;
        entry.editing = false;

        if entry.new {
            entry.name = new_name.to_string();
            entry.path = sibling_path(&entry.path, new_name);
            return Some(PendingRename::Create {
                id,
                folder: entry.clone(),
            });
        }

        if new_name == previous {
            return None;
        }
        let new_path = sibling_path(&entry.path, new_name);
        entry.name = new_name.to_string();
        Some(PendingRename::Rename {
            id,
            file: entry.clone(),
            new_path,
            previous: previous.to_string(),
        })
    }

    /// 백엔드 결과 반영 (2단계)
    ///
    /// 그 사이 목록에서 사라진 항목에는 아무것도 하지 않습니다.
    pub fn finish_rename(&mut self, pending: PendingRename, result: BackendResult<()>) {
        let id = pending.id();
        if self.entry(id).is_none() {
            debug!(%id, "entry detached before rename completed");
            return;
        }

        match (pending, result) {
            (PendingRename::Create { folder, .. }, Ok(())) => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.new = false;
                }
                info!(path = %folder.path, "folder created");
            }
            (PendingRename::Create { folder, .. }, Err(err)) if err.is_collision() => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.editing = true;
                }
                warn!(path = %folder.path, "folder name collision");
            }
            (PendingRename::Create { folder, .. }, Err(err)) => {
                warn!(path = %folder.path, %err, "folder creation failed, removing placeholder");
                self.remove_entries(&[id]);
            }
            (PendingRename::Rename { new_path, .. }, Ok(())) => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.path = new_path;
                }
            }
            (PendingRename::Rename { new_path, .. }, Err(err)) if err.is_collision() => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.editing = true;
                }
                warn!(path = %new_path, "rename collision");
            }
            (PendingRename::Rename { previous, .. }, Err(err)) => {
                warn!(%err, "rename failed, restoring {:?}", previous);
                if let Some(entry) = self.entry_mut(id) {
                    entry.name = previous;
                }
            }
        }
    }

    /// 인라인 편집 확정 후 백엔드 호출까지 한 번에 수행
    pub async fn rename<B>(
        &mut self,
        id: EntryId,
        new_name: &str,
        previous: &str,
        backend: &B,
    ) -> BackendResult<()>
    where
        B: FileBackend + ?Sized,
    {
        let Some(pending) = self.begin_rename(id, new_name, previous) else {
            return Ok(());
        };
        let result = match &pending {
            PendingRename::Create { folder, .. } => backend.create_folder(folder).await,
            PendingRename::Rename { file, new_path, .. } => {
                backend.rename_file(file, new_path).await
            }
        };
        self.finish_rename(pending, result.clone());
        result
    }

    fn remove_entries(&mut self, ids: &[EntryId]) {
        self.entries.retain(|e| !ids.contains(&e.id));
        let before = self.selection.len();
        self.selection.retain(|id| !ids.contains(id));
        if let ContextTarget::Entries(targets) = &mut self.context {
            targets.retain(|id| !ids.contains(id));
        }
        if self.selection.len() != before {
            self.emit_highlight();
        }
    }

    /// 우클릭 (`None`은 빈 공간)
    pub fn right_click(&mut self, id: Option<EntryId>) {
        self.context = match id {
            None => ContextTarget::CurrentFolder,
            Some(id) if !self.selection.contains(&id) => ContextTarget::Entries(vec![id]),
            Some(_) => ContextTarget::Entries(self.selection.clone()),
        };
    }

    pub fn context_target(&self) -> &ContextTarget {
        &self.context
    }

    /// 컨텍스트 메뉴 대상 항목
    pub fn context_entries(&self) -> Vec<FileEntry> {
        match &self.context {
            ContextTarget::None => Vec::new(),
            ContextTarget::CurrentFolder => vec![self.folder.clone()],
            ContextTarget::Entries(ids) => ids
                .iter()
                .filter_map(|&id| self.entry(id))
                .cloned()
                .collect(),
        }
    }

    /// 메뉴 "이름 바꾸기": 첫 대상 항목을 편집 상태로
    pub fn rename_target(&mut self) {
        let first = match &self.context {
            ContextTarget::Entries(ids) => ids.first().copied(),
            _ => None,
        };
        if let Some(entry) = first.and_then(|id| self.entry_mut(id)) {
            entry.editing = true;
        }
    }

    /// 메뉴 "삭제": 컨텍스트 대상 삭제 요청
    pub fn delete_targets(&mut self) {
        let targets = self.context_entries();
        if !targets.is_empty() {
            self.events.push(DialogEvent::DeleteRequested(targets));
        }
    }

    /// Delete 키: 현재 선택 삭제 요청
    pub fn request_delete_selection(&mut self) {
        let selection = self.selection_snapshot();
        if !selection.is_empty() {
            self.events.push(DialogEvent::DeleteRequested(selection));
        }
    }

    /// 호스트가 삭제를 확인한 뒤 호출. 성공하면 목록과 선택에서 제거
    pub async fn confirm_delete<B>(&mut self, files: &[FileEntry], backend: &B) -> BackendResult<()>
    where
        B: FileBackend + ?Sized,
    {
        if let Err(err) = backend.delete_files(files).await {
            warn!(count = files.len(), %err, "delete failed");
            return Err(err);
        }
        let ids: Vec<EntryId> = files.iter().map(|f| f.id).collect();
        self.remove_entries(&ids);
        info!(count = files.len(), "files deleted");
        Ok(())
    }

    /// 메뉴 "복사"
    pub fn copy_targets(&mut self) {
        self.clipboard
            .set(self.context_entries(), ClipboardOperation::Copy);
    }

    /// 메뉴 "잘라내기"
    pub fn cut_targets(&mut self) {
        self.clipboard
            .set(self.context_entries(), ClipboardOperation::Cut);
    }

    /// 붙여넣기 가능 여부: 대상이 폴더 하나이고 클립보드가 비어 있지 않음
    pub fn can_paste(&self) -> bool {
        if self.clipboard.is_empty() {
            return false;
        }
        match &self.context {
            ContextTarget::CurrentFolder => self.folder.is_folder(),
            ContextTarget::Entries(ids) if ids.len() == 1 => {
                self.entry(ids[0]).is_some_and(FileEntry::is_folder)
            }
            _ => false,
        }
    }

    /// 클립보드 내용을 `destination`(없으면 컨텍스트 대상)에 붙여넣기
    ///
    /// 잘라내기는 이동, 복사는 복사로 요청하고 클립보드를 비웁니다.
    /// 붙여넣을 것이 없거나 대상이 폴더가 아니면 `Ok(false)`.
    pub async fn paste<B>(&mut self, destination: Option<&FileEntry>, backend: &B) -> BackendResult<bool>
    where
        B: FileBackend + ?Sized,
    {
        let destination = match destination {
            Some(dest) => dest.clone(),
            None => match self.context_entries().into_iter().next() {
                Some(target) => target,
                None => return Ok(false),
            },
        };
        if !destination.is_folder() {
            warn!(path = %destination.path, "paste target is not a folder");
            return Ok(false);
        }
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
                "pasted"
            ),
            Err(err) => warn!(op = operation.name(), %err, "paste failed"),
        }
        result.map(|()| true)
    }

    /// 현재 폴더에 붙여넣기
    pub async fn paste_into_current_folder<B>(&mut self, backend: &B) -> BackendResult<bool>
    where
        B: FileBackend + ?Sized,
    {
        let folder = self.folder.clone();
        self.paste(Some(&folder), backend).await
    }

    /// 드래그 앤 드롭: `from` 항목들을 폴더 `to`로 이동
    pub async fn drop_onto<B>(&mut self, from: &[EntryId], to: EntryId, backend: &B) -> BackendResult<bool>
    where
        B: FileBackend + ?Sized,
    {
        let Some(destination) = self.entry(to).filter(|e| e.is_folder()).cloned() else {
            return Ok(false);
        };
        let items: Vec<FileEntry> = from
            .iter()
            .filter(|&&id| id != to)
            .filter_map(|&id| self.entry(id))
            .cloned()
            .collect();
        if items.is_empty() {
            return Ok(false);
        }
        backend.move_files(&items, &destination).await?;
        Ok(true)
    }

    /// 키 입력 처리. 실행된 액션을 돌려줌
    ///
    /// 복사/잘라내기는 현재 선택을 컨텍스트 대상으로 삼습니다.
    pub async fn handle_key<B>(
        &mut self,
        event: &KeyEvent,
        focus: InputFocus,
        backend: &B,
    ) -> BackendResult<Option<Action>>
    where
        B: FileBackend + ?Sized,
    {
        let Some(action) = action_for_event(event, focus) else {
            return Ok(None);
        };
        match action {
            Action::Copy => {
                self.context = ContextTarget::Entries(self.selection.clone());
                self.copy_targets();
            }
            Action::Cut => {
                self.context = ContextTarget::Entries(self.selection.clone());
                self.cut_targets();
            }
            Action::Paste => {
                self.paste_into_current_folder(backend).await?;
            }
            Action::SelectAll => self.select_all(),
            Action::Delete => self.request_delete_selection(),
        }
        Ok(Some(action))
    }

    /// 날짜 컬럼 문자열
    pub fn date_label(&self, id: EntryId) -> String {
        format_optional_date(self.entry(id).and_then(|e| e.date))
    }

    pub fn icon(&self, id: EntryId) -> Option<FileIcon> {
        self.entry(id).map(FileEntry::icon)
    }

    /// 쌓인 호스트 알림 꺼내기
    pub fn drain_events(&mut self) -> Vec<DialogEvent> {
        self.events.drain()
    }
}
