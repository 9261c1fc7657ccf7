//! 키보드 단축키: 파일 목록 액션 레지스트리
//!
//! 복사/잘라내기/붙여넣기/전체 선택은 플랫폼 표준 조합(Ctrl 또는 Cmd)으로,
//! 삭제는 Backspace/Delete로 바인딩됩니다. 텍스트 입력에 포커스가 있으면
//! 어떤 단축키도 동작하지 않습니다.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::LazyLock;

/// 파일 목록 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy,
    Cut,
    /// 현재 폴더에 붙여넣기
    Paste,
    SelectAll,
    /// 현재 선택 항목 삭제 요청
    Delete,
}

/// 키 입력 시점의 포커스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    /// 목록/트리 등 일반 영역
    #[default]
    List,
    /// 이름 편집 등 텍스트 입력
    TextInput,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub shortcut_display: &'static str,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

pub static ACTION_DEFS: &[ActionDef] = &[
    ActionDef {
        action: Action::Copy,
        id: "copy",
        label: "Copy",
        shortcut_display: "^C",
    },
    ActionDef {
        action: Action::Cut,
        id: "cut",
        label: "Cut",
        shortcut_display: "^X",
    },
    ActionDef {
        action: Action::Paste,
        id: "paste",
        label: "Paste",
        shortcut_display: "^V",
    },
    ActionDef {
        action: Action::SelectAll,
        id: "select_all",
        label: "Select all",
        shortcut_display: "^A",
    },
    ActionDef {
        action: Action::Delete,
        id: "delete",
        label: "Delete",
        shortcut_display: "Del / Bksp",
    },
];

impl Action {
    pub fn from_id(id: &str) -> Option<Action> {
        ACTION_DEFS.iter().find(|d| d.id == id).map(|d| d.action)
    }

    pub fn def(&self) -> Option<&'static ActionDef> {
        ACTION_DEFS.iter().find(|d| d.action == *self)
    }
}

fn build_key_bindings() -> Vec<KeyBinding> {
    let chords = [
        ('c', Action::Copy),
        ('x', Action::Cut),
        ('v', Action::Paste),
        ('a', Action::SelectAll),
    ];
    let mut bindings = Vec::new();
    // Ctrl (Windows/Linux) 와 Cmd (macOS) 모두 허용
    for modifier in [KeyModifiers::CONTROL, KeyModifiers::SUPER] {
        for (key, action) in chords {
            bindings.push(KeyBinding {
                code: KeyCode::Char(key),
                modifiers: Some(modifier),
                action,
            });
        }
    }
    bindings.push(KeyBinding {
        code: KeyCode::Backspace,
        modifiers: None,
        action: Action::Delete,
    });
    bindings.push(KeyBinding {
        code: KeyCode::Delete,
        modifiers: None,
        action: Action::Delete,
    });
    bindings
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode, focus: InputFocus) -> Option<Action> {
    if focus == InputFocus::TextInput {
        return None;
    }
    // Shift가 함께 눌려 대문자가 들어온 경우도 같은 단축키로 취급
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    let modifiers = modifiers.difference(KeyModifiers::SHIFT);
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true,
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

/// crossterm 키 이벤트로 액션 조회
pub fn action_for_event(event: &KeyEvent, focus: InputFocus) -> Option<Action> {
    find_action(event.modifiers, event.code, focus)
}
