use std::collections::HashSet;

/// Ids the user has bookmarked (saved jobs, registered events).
///
/// Consumed by the saved-only filter predicate and display badges; fully
/// independent of filter and sort state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSet {
    ids: HashSet<String>,
}

impl SavedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for `id`; returns whether the id is saved afterwards.
    /// Toggling twice returns the set to its original state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut saved = SavedSet::new();
        saved.toggle("j2");
        let before = saved.clone();

        assert!(saved.toggle("j1"));
        assert!(!saved.toggle("j1"));

        assert_eq!(saved, before);
    }

    #[test]
    fn toggle_reports_membership_after_the_flip() {
        let mut saved = SavedSet::new();
        assert!(saved.toggle("e1"));
        assert!(saved.contains("e1"));
        assert_eq!(saved.len(), 1);
    }
}
