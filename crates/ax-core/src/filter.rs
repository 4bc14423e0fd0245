use unicode_normalization::UnicodeNormalization;

use crate::candidate::{Candidate, SearchField};
use crate::saved::SavedSet;

/// Case folding used by every text predicate: NFKC normalization followed by
/// Unicode lowercasing, so "Résumé" matches "résumé" and full-width forms
/// match their ASCII counterparts.
pub fn fold_for_search(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// One free-text predicate: a term matched case-insensitively as a substring
/// against a configurable set of searchable fields. The candidate passes if
/// ANY configured field contains the term.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFilter {
    pub term: String,
    pub fields: Vec<SearchField>,
}

impl TextFilter {
    pub fn new(term: impl Into<String>, fields: Vec<SearchField>) -> Self {
        Self {
            term: term.into(),
            fields,
        }
    }

    /// Technology box: skills/requirements plus description.
    pub fn technology(term: impl Into<String>) -> Self {
        Self::new(term, vec![SearchField::Skills, SearchField::Description])
    }

    /// Industry box: organization plus description.
    pub fn industry(term: impl Into<String>) -> Self {
        Self::new(term, vec![SearchField::Organization, SearchField::Description])
    }

    /// Broad search across every field group.
    pub fn any(term: impl Into<String>) -> Self {
        Self::new(
            term,
            vec![
                SearchField::Title,
                SearchField::Organization,
                SearchField::Description,
                SearchField::Skills,
                SearchField::Location,
            ],
        )
    }

    fn is_active(&self) -> bool {
        !self.term.trim().is_empty()
    }

    fn matches<C: Candidate>(&self, candidate: &C) -> bool {
        let needle = fold_for_search(self.term.trim());
        self.fields.iter().any(|field| {
            candidate
                .search_text(*field)
                .iter()
                .any(|text| fold_for_search(text).contains(&needle))
        })
    }
}

/// Experience-level bucket, keyword-matched against the candidate title.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ExperienceLevel {
    #[default]
    All,
    Internship,
    #[strum(serialize = "Junior", serialize = "Entry Level")]
    Junior,
    Senior,
}

impl ExperienceLevel {
    fn matches<C: Candidate>(&self, candidate: &C) -> bool {
        let title = fold_for_search(candidate.title());
        match self {
            ExperienceLevel::All => true,
            ExperienceLevel::Internship => {
                candidate.classification() == Some("Internship") || title.contains("intern")
            }
            ExperienceLevel::Junior => {
                title.contains("junior")
                    || title.contains("associate")
                    || title.contains("graduate")
            }
            ExperienceLevel::Senior => title.contains("senior") || title.contains("lead"),
        }
    }
}

/// User-entered filter criteria. Every predicate left at its default is
/// disabled; an empty term or the "All" sentinel never means "match nothing".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub text: Vec<TextFilter>,
    /// Categorical filter over the candidate's classification field;
    /// `None`, empty, or "All" disables it.
    pub category: Option<String>,
    pub experience: ExperienceLevel,
    pub saved_only: bool,
}

impl FilterCriteria {
    fn category_term(&self) -> Option<String> {
        let raw = self.category.as_deref()?.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return None;
        }
        Some(fold_for_search(raw))
    }
}

/// Pure local filter stage: retains exactly the candidates satisfying every
/// active predicate (AND semantics), preserving input order. Disabling all
/// predicates returns the input unchanged.
pub fn filter<C: Candidate>(
    candidates: &[C],
    criteria: &FilterCriteria,
    saved: &SavedSet,
) -> Vec<C> {
    let category = criteria.category_term();

    candidates
        .iter()
        .filter(|candidate| {
            if criteria.saved_only && !saved.contains(candidate.id()) {
                return false;
            }

            if let Some(needle) = &category {
                let matched = candidate
                    .classification()
                    .map(|class| fold_for_search(class).contains(needle))
                    .unwrap_or(false);
                if !matched {
                    return false;
                }
            }

            if !criteria.experience.matches(*candidate) {
                return false;
            }

            criteria
                .text
                .iter()
                .filter(|text| text.is_active())
                .all(|text| text.matches(*candidate))
        })
        .cloned()
        .collect()
}
