use crate::{BufferId, Editor, HostError, Severity};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Buffer {
    name: String,
    filetype: String,
}

/// In-memory editor for headless use and tests. Buffers are plain records;
/// notifications are kept for inspection instead of being displayed.
#[derive(Debug, Default)]
pub struct NoopEditor {
    buffers: HashMap<u64, Buffer>,
    next_id: u64,
    pub notifications: Vec<(Severity, String)>,
    pub fail_sets: bool,
}

impl NoopEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_buffer(&mut self, name: &str, filetype: &str) -> BufferId {
        let id = self.next_id;
        self.next_id += 1;
        self.buffers.insert(
            id,
            Buffer {
                name: name.to_string(),
                filetype: filetype.to_string(),
            },
        );
        BufferId(id)
    }
}

impl Editor for NoopEditor {
    fn buffer_name(&self, buf: BufferId) -> String {
        self.buffers
            .get(&buf.0)
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }

    fn filetype(&self, buf: BufferId) -> String {
        self.buffers
            .get(&buf.0)
            .map(|b| b.filetype.clone())
            .unwrap_or_default()
    }

    fn set_filetype(&mut self, buf: BufferId, filetype: &str) -> Result<(), HostError> {
        if self.fail_sets {
            return Err(HostError::SetFailed("simulated failure".to_string()));
        }
        let buffer = self.buffers.get_mut(&buf.0).ok_or(HostError::BufferGone)?;
        buffer.filetype = filetype.to_string();
        Ok(())
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        self.notifications.push((severity, message.to_string()));
    }
}
