use crate::error::{EngineError, Result};
use crate::extract::extract;
use crate::model::{DomainEvent, ErrorEvent, RawRecord};
use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, Scope, ScopedJoinHandle};

/// Fixed number of workers sharing one work queue.
///
/// Each worker owns clones of the two output senders. The output channels
/// therefore disconnect only once the last worker has returned, which is what
/// the aggregator waits for.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    /// # Errors
    /// Returns `EngineError::Config` when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(EngineError::Config(
                "worker pool size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Start every worker inside `scope`. Each handle yields the number of
    /// records that worker handled.
    ///
    /// # Errors
    /// Returns `EngineError::Spawn` if the OS refuses a thread. Workers started
    /// before the failure keep running until the work queue closes.
    pub fn spawn<'scope>(
        &self,
        scope: &'scope Scope<'scope, '_>,
        work: &Receiver<RawRecord>,
        domains: &Sender<DomainEvent>,
        errors: &Sender<ErrorEvent>,
    ) -> Result<Vec<ScopedJoinHandle<'scope, u64>>> {
        (0..self.size)
            .map(|id| {
                let work = work.clone();
                let domains = domains.clone();
                let errors = errors.clone();
                spawn_named(scope, format!("domain-worker-{id}"), move || {
                    run_worker(&work, &domains, &errors)
                })
            })
            .collect()
    }
}

pub(crate) fn spawn_named<'scope, F, T>(
    scope: &'scope Scope<'scope, '_>,
    name: String,
    f: F,
) -> Result<ScopedJoinHandle<'scope, T>>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn_scoped(scope, f)
        .map_err(|source| EngineError::Spawn { name, source })
}

/// Pull records until the work queue is closed and drained, publishing one
/// event per record.
pub fn run_worker(
    work: &Receiver<RawRecord>,
    domains: &Sender<DomainEvent>,
    errors: &Sender<ErrorEvent>,
) -> u64 {
    let mut handled = 0;
    for record in work {
        let published = match extract(&record) {
            Ok(domain) => domains.send(DomainEvent::single(domain)).is_ok(),
            Err(error) => errors.send(ErrorEvent::from(error)).is_ok(),
        };
        // The aggregator is gone; nobody is left to observe further events.
        if !published {
            break;
        }
        handled += 1;
    }
    handled
}
