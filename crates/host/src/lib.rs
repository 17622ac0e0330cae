//! Editor capability seam: everything ftmemo needs from the embedding host.

use thiserror::Error;

pub mod noop;

/// Opaque handle for a host buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("buffer no longer exists")]
    BufferGone,
    #[error("filetype assignment failed: {0}")]
    SetFailed(String),
}

/// Buffer access and user notification, implemented by the embedding editor.
///
/// Ordering contract: the host dispatcher serializes callbacks and must
/// deliver buffer-open handling only after its own automatic filetype
/// detection for that buffer has settled, and filetype-change observations
/// only once the new value is fully committed. In practice both are a
/// deferred callback on the host's event loop; ftmemo itself never
/// schedules anything.
pub trait Editor {
    /// File name associated with the buffer; empty for unnamed/scratch
    /// buffers.
    fn buffer_name(&self, buf: BufferId) -> String;

    /// Current filetype of the buffer; empty when none is set.
    fn filetype(&self, buf: BufferId) -> String;

    fn set_filetype(&mut self, buf: BufferId, filetype: &str) -> Result<(), HostError>;

    /// User-visible notification sink.
    fn notify(&mut self, severity: Severity, message: &str);
}
