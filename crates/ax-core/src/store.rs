use thiserror::Error;
use ulid::Ulid;

use crate::candidate::Candidate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate candidate id: {0}")]
    DuplicateId(String),
    #[error("unknown candidate id: {0}")]
    UnknownId(String),
}

/// In-memory collection of candidates for one view session.
///
/// Seeded at session start, grown by explicit create actions (prepended,
/// most-recent-first) and shrunk only by explicit delete. Candidates are
/// replaced whole, never partially mutated; `id` is unique within a
/// snapshot.
#[derive(Debug, Clone)]
pub struct CandidateStore<C: Candidate> {
    id_prefix: &'static str,
    items: Vec<C>,
}

impl<C: Candidate> CandidateStore<C> {
    /// `id_prefix` tags minted ids by entity kind ("j" jobs, "e" events).
    pub fn new(id_prefix: &'static str) -> Self {
        Self {
            id_prefix,
            items: Vec::new(),
        }
    }

    pub fn with_seed(id_prefix: &'static str, seed: Vec<C>) -> Result<Self, StoreError> {
        let mut store = Self::new(id_prefix);
        store.replace_all(seed)?;
        Ok(store)
    }

    /// Freshly minted candidate id: prefix + ULID, so ids are unique and
    /// time-ordered.
    pub fn mint_id(&self) -> String {
        format!("{}{}", self.id_prefix, Ulid::new())
    }

    /// Create action: builds the candidate from a freshly minted id and
    /// prepends it.
    pub fn add(&mut self, make: impl FnOnce(String) -> C) -> &C {
        let candidate = make(self.mint_id());
        self.items.insert(0, candidate);
        &self.items[0]
    }

    /// Insert a candidate that already carries an id (e.g. fetched records).
    pub fn insert(&mut self, candidate: C) -> Result<(), StoreError> {
        if self.contains(candidate.id()) {
            return Err(StoreError::DuplicateId(candidate.id().to_string()));
        }
        self.items.insert(0, candidate);
        Ok(())
    }

    /// Wholesale session seed; rejects duplicate ids within the batch.
    pub fn replace_all(&mut self, candidates: Vec<C>) -> Result<(), StoreError> {
        let mut seen = std::collections::HashSet::with_capacity(candidates.len());
        for candidate in &candidates {
            if !seen.insert(candidate.id().to_string()) {
                return Err(StoreError::DuplicateId(candidate.id().to_string()));
            }
        }
        self.items = candidates;
        Ok(())
    }

    /// Full replacement of one candidate, in place (position preserved).
    pub fn replace(&mut self, candidate: C) -> Result<(), StoreError> {
        let id = candidate.id().to_string();
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => {
                *slot = candidate;
                Ok(())
            }
            None => Err(StoreError::UnknownId(id)),
        }
    }

    /// Explicit delete; the only way the store shrinks within a session.
    pub fn remove(&mut self, id: &str) -> Result<C, StoreError> {
        match self.items.iter().position(|item| item.id() == id) {
            Some(pos) => Ok(self.items.remove(pos)),
            None => Err(StoreError::UnknownId(id.to_string())),
        }
    }

    pub fn get(&self, id: &str) -> Option<&C> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Current full set, most-recent-first for user-created entries.
    pub fn all(&self) -> &[C] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
