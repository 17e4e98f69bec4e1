//! Mount targets: the addressable slots render output lands in.

use std::collections::HashMap;
use std::sync::Mutex;

struct MountTarget {
    html: String,
    generation: u64,
}

/// Registry of mount targets, keyed by caller-supplied id.
///
/// Each full assignment bumps the target's generation. Later
/// incremental mutations (the diagram pass) carry the generation they
/// were started under and are discarded once a newer assignment has
/// replaced the content, so a superseded render can never scribble
/// over its successor.
#[derive(Default)]
pub struct MountRegistry {
    targets: Mutex<HashMap<String, MountTarget>>,
}

impl MountRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mount target. Replaces any previous target
    /// under the same id.
    pub fn create(&self, id: &str) {
        self.targets.lock().unwrap().insert(
            id.to_owned(),
            MountTarget {
                html: String::new(),
                generation: 0,
            },
        );
    }

    /// Drop a mount target. Pending generation-checked updates for it
    /// become no-ops.
    pub fn remove(&self, id: &str) {
        self.targets.lock().unwrap().remove(id);
    }

    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.targets.lock().unwrap().contains_key(id)
    }

    /// Replace a target's content in full, returning the new
    /// generation, or `None` if the target does not exist.
    pub fn assign(&self, id: &str, html: String) -> Option<u64> {
        let mut targets = self.targets.lock().unwrap();
        let target = targets.get_mut(id)?;
        target.html = html;
        target.generation += 1;
        Some(target.generation)
    }

    /// Current content of a target.
    #[must_use]
    pub fn html(&self, id: &str) -> Option<String> {
        self.targets
            .lock()
            .unwrap()
            .get(id)
            .map(|target| target.html.clone())
    }

    /// Mutate a target's content only if `generation` is still the
    /// current one. Returns whether the mutation was applied.
    pub fn update_if_current(
        &self,
        id: &str,
        generation: u64,
        update: impl FnOnce(&mut String),
    ) -> bool {
        let mut targets = self.targets.lock().unwrap();
        match targets.get_mut(id) {
            Some(target) if target.generation == generation => {
                update(&mut target.html);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_requires_existing_target() {
        let mounts = MountRegistry::new();
        assert_eq!(mounts.assign("preview", "<p>x</p>".to_owned()), None);

        mounts.create("preview");
        assert_eq!(mounts.assign("preview", "<p>x</p>".to_owned()), Some(1));
        assert_eq!(mounts.html("preview").unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_generation_bumps_per_assignment() {
        let mounts = MountRegistry::new();
        mounts.create("t");
        assert_eq!(mounts.assign("t", String::new()), Some(1));
        assert_eq!(mounts.assign("t", String::new()), Some(2));
    }

    #[test]
    fn test_update_applies_only_for_current_generation() {
        let mounts = MountRegistry::new();
        mounts.create("t");
        let generation = mounts.assign("t", "old".to_owned()).unwrap();

        assert!(mounts.update_if_current("t", generation, |html| html.push_str("+patch")));
        assert_eq!(mounts.html("t").unwrap(), "old+patch");

        // A newer assignment invalidates the old generation.
        mounts.assign("t", "new".to_owned());
        assert!(!mounts.update_if_current("t", generation, |html| html.push_str("+stale")));
        assert_eq!(mounts.html("t").unwrap(), "new");
    }

    #[test]
    fn test_remove() {
        let mounts = MountRegistry::new();
        mounts.create("t");
        let generation = mounts.assign("t", "x".to_owned()).unwrap();
        mounts.remove("t");
        assert!(!mounts.exists("t"));
        assert!(!mounts.update_if_current("t", generation, |_| {}));
    }

    #[test]
    fn test_missing_target_reads() {
        let mounts = MountRegistry::new();
        assert!(!mounts.exists("nope"));
        assert_eq!(mounts.html("nope"), None);
        assert!(!mounts.update_if_current("nope", 1, |_| {}));
    }
}
