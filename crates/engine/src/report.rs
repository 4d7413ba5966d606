use crate::aggregate::DomainCounts;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: u64,
}

/// Domains in ascending byte order, each with its final count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortedReport {
    entries: Vec<DomainCount>,
}

impl SortedReport {
    pub fn iter(&self) -> std::slice::Iter<'_, DomainCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn get(&self, domain: &str) -> Option<u64> {
        self.entries
            .binary_search_by(|e| e.domain.as_str().cmp(domain))
            .ok()
            .map(|idx| self.entries[idx].count)
    }

    /// `(domain, count)` pairs, convenient for comparisons.
    pub fn pairs(&self) -> Vec<(&str, u64)> {
        self.entries
            .iter()
            .map(|e| (e.domain.as_str(), e.count))
            .collect()
    }
}

impl From<DomainCounts> for SortedReport {
    fn from(counts: DomainCounts) -> Self {
        let mut entries: Vec<DomainCount> = counts
            .into_iter()
            .map(|(domain, count)| DomainCount { domain, count })
            .collect();
        // Keys are unique, so an unstable sort is deterministic.
        entries.sort_unstable_by(|a, b| a.domain.cmp(&b.domain));
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a SortedReport {
    type Item = &'a DomainCount;
    type IntoIter = std::slice::Iter<'a, DomainCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
