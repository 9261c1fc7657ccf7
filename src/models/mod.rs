// Data Models
pub mod file_entry;
pub mod folder_tree;
pub mod sort;

pub use file_entry::{EntryId, EntryKind, FileEntry, FileIcon};
pub use folder_tree::{FolderInfo, FolderNode, FolderTree, NodeId};
pub use sort::{SortField, SortSpec, SortState};
