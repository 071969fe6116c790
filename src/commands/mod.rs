pub mod select;
pub mod stashes;
pub mod status;
pub mod tree;

pub use select::*;
pub use stashes::*;
pub use status::*;
pub use tree::*;

use std::path::PathBuf;

/// Where a command finds the checkout and the `fossil` executable
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub workspace: Option<PathBuf>,
    pub fossil: Option<PathBuf>,
}
