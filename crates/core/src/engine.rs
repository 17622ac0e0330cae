//! Restoration engine: the owning context for config, store, mapping, and
//! detector. One instance per host; no module-level state.

use crate::config::AppConfig;
use crate::detector::{Classification, Detector};
use crate::resolver;
use anyhow::Context;
use host::{BufferId, Editor, Severity};
use std::path::Path;
use storage::{Mapping, MappingStore};
use tracing::{debug, info};

pub struct Engine {
    pub(crate) config: AppConfig,
    pub(crate) store: MappingStore,
    pub(crate) mapping: Mapping,
    pub(crate) detector: Detector,
}

impl Engine {
    /// Prepare the storage directory and load the mapping (corruption is
    /// quarantined inside the store). Hosts are expected to run `cleanup`
    /// once after construction for the startup existence sweep.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = MappingStore::new(&config.storage.path);
        store
            .ensure_directory()
            .context("prepare storage directory")?;
        let mapping = store.load().context("load filetype mappings")?;
        Ok(Self {
            config,
            store,
            mapping,
            detector: Detector::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle a buffer-open event: restore a stored filetype, or seed the
    /// detector baseline with the host's automatic detection.
    ///
    /// The host must deliver this after its own filetype detection has
    /// settled (see the `Editor` ordering contract), otherwise the host
    /// would overwrite the restored value.
    pub fn on_buffer_open(&mut self, editor: &mut dyn Editor, buf: BufferId) {
        if !self.config.enabled {
            return;
        }
        let Some(path) = resolver::resolve(&editor.buffer_name(buf)) else {
            return;
        };
        let key = path.to_string_lossy().into_owned();
        match self.mapping.get(&key).cloned() {
            None => {
                let current = editor.filetype(buf);
                self.detector.seed(&path, &current);
                debug!(path = %key, filetype = %current, "no stored filetype; seeded baseline");
            }
            Some(stored) => {
                let _suppress = self.detector.suppress();
                if let Err(e) = editor.set_filetype(buf, &stored) {
                    editor.notify(
                        Severity::Error,
                        &format!("ftmemo: cannot restore filetype for {key}: {e}"),
                    );
                }
                self.detector.seed(&path, &stored);
                debug!(path = %key, filetype = %stored, "restored stored filetype");
            }
        }
    }

    /// Handle a filetype-change event. Manual changes are persisted; a
    /// save failure is notified and the in-memory entry kept so the next
    /// mutation retries the write.
    pub fn on_filetype_changed(&mut self, editor: &mut dyn Editor, buf: BufferId, new_ft: &str) {
        if !self.config.enabled || new_ft.is_empty() {
            return;
        }
        let Some(path) = resolver::resolve(&editor.buffer_name(buf)) else {
            return;
        };
        if self.detector.observe(&path, new_ft) != Classification::Manual {
            return;
        }
        let key = path.to_string_lossy().into_owned();
        self.mapping.insert(key.clone(), new_ft.to_string());
        match self.store.save(&self.mapping) {
            Ok(()) => info!(path = %key, filetype = %new_ft, "remembered manual filetype"),
            Err(e) => editor.notify(
                Severity::Error,
                &format!("ftmemo: cannot save filetype mappings: {e}"),
            ),
        }
    }

    pub(crate) fn key_for(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }
}
