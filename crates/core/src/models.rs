use serde::{Deserialize, Serialize};

pub use storage::Mapping;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub path: String,
    pub filetype: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CleanupSummary {
    pub removed: usize,
}
