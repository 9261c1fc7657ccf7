// Core: 단축키 레지스트리와 공유 클립보드
pub mod actions;
pub mod clipboard;

pub use actions::{find_action, Action, InputFocus};
pub use clipboard::{Clipboard, ClipboardOperation};
