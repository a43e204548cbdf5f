//! In-memory hierarchical filesystem backing the terminal.
//!
//! The tree is immutable once built: every mutation copies the directories
//! between the root and the edited entry and shares everything else, so a
//! snapshot taken earlier keeps describing the tree as it was.

mod error;
mod path;
mod tree;
mod vfs;

pub use error::FsError;
pub use path::{VirtualPath, is_valid_name, normalize};
pub use tree::{Children, Node, NodeKind};
pub use vfs::VirtualFileSystem;
