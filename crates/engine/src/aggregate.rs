use crate::logger::Logger;
use crate::model::{DomainEvent, ErrorEvent};
use crossbeam_channel::{Receiver, never, select};
use std::collections::HashMap;
use std::collections::hash_map;

/// Occurrences per email domain. Keys are compared byte for byte, so
/// `GitHub.com` and `github.com` are distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainCounts(HashMap<String, u64>);

impl DomainCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, domain: String, count: u64) {
        *self.0.entry(domain).or_insert(0) += count;
    }

    pub fn get(&self, domain: &str) -> Option<u64> {
        self.0.get(domain).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

impl IntoIterator for DomainCounts {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for DomainCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (domain, count) in iter {
            counts.add(domain.into(), count);
        }
        counts
    }
}

/// Final state of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub counts: DomainCounts,
    pub valid_records: u64,
    pub invalid_records: u64,
}

/// Single consumer folding worker events into [`DomainCounts`].
pub struct Aggregator<'a> {
    logger: &'a dyn Logger,
    state: Aggregation,
}

impl<'a> Aggregator<'a> {
    pub fn new(logger: &'a dyn Logger) -> Self {
        Self {
            logger,
            state: Aggregation::default(),
        }
    }

    pub fn record_domain(&mut self, event: DomainEvent) {
        self.state.valid_records += event.count;
        self.state.counts.add(event.domain, event.count);
    }

    /// Errors are reported and counted, never folded into the domain counts.
    pub fn record_error(&mut self, event: &ErrorEvent) {
        self.state.invalid_records += 1;
        self.logger.warn(&format!("Skipping record: {}", event.error));
    }

    /// Consume both streams in arrival order until each one is closed and
    /// empty, then hand back the result.
    pub fn run(
        mut self,
        domains: &Receiver<DomainEvent>,
        errors: &Receiver<ErrorEvent>,
    ) -> Aggregation {
        // A disconnected receiver is swapped for one that never fires so the
        // other stream keeps being drained.
        let closed_domains = never();
        let closed_errors = never();
        let mut domains_open = true;
        let mut errors_open = true;

        while domains_open || errors_open {
            let domain_rx = if domains_open { domains } else { &closed_domains };
            let error_rx = if errors_open { errors } else { &closed_errors };

            select! {
                recv(domain_rx) -> msg => match msg {
                    Ok(event) => self.record_domain(event),
                    Err(_) => domains_open = false,
                },
                recv(error_rx) -> msg => match msg {
                    Ok(event) => self.record_error(&event),
                    Err(_) => errors_open = false,
                },
            }
        }

        self.finish()
    }

    pub fn finish(self) -> Aggregation {
        self.state
    }
}
