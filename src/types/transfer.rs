use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of moving a finished download into the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferInfo {
    pub path: PathBuf,
    pub target_path: Option<PathBuf>,
    pub message: Option<String>,
}

impl TransferInfo {
    pub fn succeeded(&self) -> bool {
        self.target_path.is_some()
    }
}
