//! Mapping maintenance: existence sweep, explicit clears, and listing.

use crate::engine::Engine;
use crate::models::{CleanupSummary, MappingEntry};
use crate::resolver;
use anyhow::Context;
use host::{BufferId, Editor, Severity};
use std::path::Path;
use tracing::info;

impl Engine {
    /// Drop every entry whose path no longer exists as a file or directory,
    /// purging the matching baseline entries. Persists only when something
    /// was removed.
    pub fn cleanup(&mut self) -> anyhow::Result<CleanupSummary> {
        let dead: Vec<String> = self
            .mapping
            .keys()
            .filter(|key| !resolver::is_present(Path::new(key)))
            .cloned()
            .collect();
        for key in &dead {
            self.mapping.remove(key);
            self.detector.forget(Path::new(key));
        }
        if !dead.is_empty() {
            self.store
                .save(&self.mapping)
                .context("persist cleaned mapping")?;
            info!(removed = dead.len(), "dropped mappings for missing files");
        }
        Ok(CleanupSummary {
            removed: dead.len(),
        })
    }

    /// Remove the entry for a path given as a string, persisting when one
    /// was removed. Falls back to the literal string when the path no
    /// longer resolves, so stale entries can still be cleared.
    pub fn clear_path(&mut self, raw: &str) -> anyhow::Result<bool> {
        let key = resolver::resolve(raw)
            .map(|p| Engine::key_for(&p))
            .unwrap_or_else(|| raw.to_string());
        let removed = self.mapping.remove(&key).is_some();
        self.detector.forget(Path::new(&key));
        if removed {
            self.store
                .save(&self.mapping)
                .context("persist mapping after clear")?;
            info!(path = %key, "cleared stored filetype");
        }
        Ok(removed)
    }

    /// Explicit user action: clear the mapping for the buffer's file and
    /// reset the buffer back to no filetype.
    pub fn clear_current(&mut self, editor: &mut dyn Editor, buf: BufferId) -> anyhow::Result<bool> {
        let name = editor.buffer_name(buf);
        let removed = self.clear_path(&name)?;
        if let Err(e) = editor.set_filetype(buf, "") {
            editor.notify(Severity::Error, &format!("ftmemo: cannot reset filetype: {e}"));
        }
        Ok(removed)
    }

    /// Ordered snapshot of the stored mappings.
    pub fn list(&self) -> Vec<MappingEntry> {
        self.mapping
            .iter()
            .map(|(path, filetype)| MappingEntry {
                path: path.clone(),
                filetype: filetype.clone(),
            })
            .collect()
    }
}
