//! Manual-change detector: decides whether an observed filetype change was
//! user-initiated by diffing it against the last value seen for that path.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Attributable to an explicit user action.
    Manual,
    /// First sighting, no change, or seen while a restoration was writing.
    Automatic,
}

#[derive(Debug, Default)]
pub struct Detector {
    baseline: HashMap<PathBuf, String>,
    suppressed: Rc<Cell<bool>>,
}

/// Clears the suppression flag when dropped, so a restoration that fails
/// mid-assignment can never leave suppression on.
pub struct SuppressionGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress classification for the lifetime of the returned guard.
    /// Restorations are never concurrent, so one flag suffices.
    pub fn suppress(&self) -> SuppressionGuard {
        self.suppressed.set(true);
        SuppressionGuard {
            flag: Rc::clone(&self.suppressed),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.get()
    }

    /// Classify one filetype-change observation.
    ///
    /// The baseline is advanced to `new_ft` on every observation, so each
    /// decision compares only against the immediately preceding state.
    /// Callers must discard empty `new_ft` values before observing; empty
    /// is not a classifiable filetype.
    pub fn observe(&mut self, path: &Path, new_ft: &str) -> Classification {
        let suppressed = self.suppressed.get();
        let previous = self.baseline.insert(path.to_path_buf(), new_ft.to_string());
        if suppressed {
            return Classification::Automatic;
        }
        match previous {
            None => Classification::Automatic,
            Some(prev) if prev == new_ft => Classification::Automatic,
            Some(_) => Classification::Manual,
        }
    }

    /// Record the current filetype for a path without classifying, used
    /// after a restore or when a file is first opened with no stored entry.
    pub fn seed(&mut self, path: &Path, filetype: &str) {
        self.baseline.insert(path.to_path_buf(), filetype.to_string());
    }

    pub fn baseline(&self, path: &Path) -> Option<&str> {
        self.baseline.get(path).map(String::as_str)
    }

    pub fn forget(&mut self, path: &Path) {
        self.baseline.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn first_sighting_is_automatic_and_seeds_baseline() {
        let mut det = Detector::new();
        assert_eq!(det.observe(&p("/a"), "python"), Classification::Automatic);
        assert_eq!(det.baseline(&p("/a")), Some("python"));
    }

    #[test]
    fn unchanged_value_is_automatic() {
        let mut det = Detector::new();
        det.observe(&p("/a"), "python");
        assert_eq!(det.observe(&p("/a"), "python"), Classification::Automatic);
    }

    #[test]
    fn differing_value_is_manual_and_advances_baseline() {
        let mut det = Detector::new();
        det.observe(&p("/a"), "python");
        assert_eq!(det.observe(&p("/a"), "rust"), Classification::Manual);
        assert_eq!(det.baseline(&p("/a")), Some("rust"));
    }

    #[test]
    fn each_decision_compares_against_the_previous_observation_only() {
        let mut det = Detector::new();
        det.observe(&p("/a"), "python");
        det.observe(&p("/a"), "rust");
        // Back to the original value still differs from the last one seen.
        assert_eq!(det.observe(&p("/a"), "python"), Classification::Manual);
    }

    #[test]
    fn suppression_forces_automatic_but_still_advances_baseline() {
        let mut det = Detector::new();
        det.observe(&p("/a"), "rust");
        let guard = det.suppress();
        assert_eq!(det.observe(&p("/a"), "go"), Classification::Automatic);
        assert_eq!(det.baseline(&p("/a")), Some("go"));
        drop(guard);
        assert!(!det.is_suppressed());
    }

    #[test]
    fn guard_clears_the_flag_on_every_exit_path() {
        let det = Detector::new();
        {
            let _guard = det.suppress();
            assert!(det.is_suppressed());
        }
        assert!(!det.is_suppressed());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = det.suppress();
            panic!("mid-restoration failure");
        }));
        assert!(result.is_err());
        assert!(!det.is_suppressed());
    }

    #[test]
    fn paths_are_tracked_independently() {
        let mut det = Detector::new();
        det.observe(&p("/a"), "python");
        assert_eq!(det.observe(&p("/b"), "rust"), Classification::Automatic);
        assert_eq!(det.observe(&p("/a"), "rust"), Classification::Manual);
    }

    #[test]
    fn seed_and_forget_maintain_the_baseline() {
        let mut det = Detector::new();
        det.seed(&p("/a"), "markdown");
        assert_eq!(det.observe(&p("/a"), "rust"), Classification::Manual);
        det.forget(&p("/a"));
        assert_eq!(det.observe(&p("/a"), "python"), Classification::Automatic);
    }
}
