//! Fragment and summary lookup by position.

use serde::Serialize;

/// Stored in place of a summary that could not be produced.
pub const SUMMARY_UNAVAILABLE: &str = "Ringkasan tidak tersedia.";

/// Fragment texts and their optional summaries, aligned by position.
///
/// Lookups never fail: an id the index hands back that has no fragment, or a
/// summary slot that is missing or holds the sentinel, is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStore {
    fragments: Vec<String>,
    summaries: Vec<String>,
}

impl CorpusStore {
    pub fn new(fragments: Vec<String>, summaries: Vec<String>) -> Self {
        Self {
            fragments,
            summaries,
        }
    }

    /// Fragment text at `id`, or `None` when out of range.
    pub fn fragment_at(&self, id: usize) -> Option<&str> {
        self.fragments.get(id).map(String::as_str)
    }

    /// Usable summary at `id`.
    ///
    /// `None` when `id` is beyond the summary sequence or the slot holds
    /// [`SUMMARY_UNAVAILABLE`].
    pub fn summary_at(&self, id: usize) -> Option<&str> {
        self.summaries
            .get(id)
            .map(String::as_str)
            .filter(|s| *s != SUMMARY_UNAVAILABLE)
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    /// Summaries that are not the sentinel.
    pub fn usable_summary_count(&self) -> usize {
        self.summaries
            .iter()
            .filter(|s| s.as_str() != SUMMARY_UNAVAILABLE)
            .count()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }
}
