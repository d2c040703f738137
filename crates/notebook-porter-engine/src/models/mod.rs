pub mod block;
pub mod document;
mod id_keys;
pub mod workspace;

pub use block::{Block, BlockKind};
pub use document::Document;
pub use workspace::{Workspace, WorkspaceError};
