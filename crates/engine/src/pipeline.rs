//! Reader → worker pool → aggregator → sorted report.
//!
//! One producer thread feeds a bounded work queue, `concurrency` workers turn
//! records into domain or error events on two bounded queues, and a single
//! aggregator thread folds those events. Every queue holds at most
//! `concurrency` items, so a slow aggregator throttles the workers and, through
//! them, the reader.

use crate::aggregate::{Aggregation, Aggregator};
use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::extract::extract;
use crate::logger::Logger;
use crate::model::{DomainEvent, ErrorEvent, RawRecord};
use crate::pool::{WorkerPool, spawn_named};
use crate::report::SortedReport;
use crate::source::RecordSource;
use crate::stats::{RunResult, RunSummary};
use crossbeam_channel::{Sender, bounded};
use std::fmt;
use std::io::Read;
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

/// Lifecycle of one run. States are only ever entered in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Idle,
    Working,
    Draining,
    Aggregated,
    Reported,
    Terminal,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Draining => "draining",
            Self::Aggregated => "aggregated",
            Self::Reported => "reported",
            Self::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ReadStats {
    sent: u64,
    read_errors: u64,
}

pub struct Pipeline<'a> {
    config: &'a Config,
    logger: &'a dyn Logger,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    /// # Errors
    /// Returns `EngineError::Config` when the configuration is invalid.
    pub fn new(config: &'a Config, logger: &'a dyn Logger) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            logger,
            state: PipelineState::Idle,
        })
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(next > self.state, "pipeline state may not go backwards");
        self.logger.debug(&format!("Pipeline state: {} -> {next}", self.state));
        self.state = next;
    }

    /// Open the configured input and run to completion.
    ///
    /// # Errors
    /// Fails only before processing starts (input cannot be opened, header
    /// unreadable) or if a pipeline thread cannot be spawned or panics.
    pub fn run(self) -> Result<RunResult> {
        let source = RecordSource::open(&self.config.input_path, self.config.read_buffer_size)
            .inspect_err(|err| self.logger.error(&format!("Pipeline did not start: {err}")))?;
        self.run_source(source)
    }

    /// Run over an already opened source.
    ///
    /// # Errors
    /// See [`Pipeline::run`].
    pub fn run_source<R: Read + Send>(mut self, source: RecordSource<R>) -> Result<RunResult> {
        let started = Instant::now();
        let pool = WorkerPool::new(self.config.concurrency)?;
        let capacity = pool.size();
        let logger = self.logger;

        let (work_tx, work_rx) = bounded::<RawRecord>(capacity);
        let (domain_tx, domain_rx) = bounded(capacity);
        let (error_tx, error_rx) = bounded::<ErrorEvent>(capacity);

        self.advance(PipelineState::Working);
        let (read, aggregation) = thread::scope(|scope| -> Result<(ReadStats, Aggregation)> {
            let producer = spawn_named(scope, "record-source".to_string(), move || {
                produce(source, &work_tx, logger)
            })?;
            let workers = pool.spawn(scope, &work_rx, &domain_tx, &error_tx)?;
            // Only the workers may hold queue ends from here on, so the output
            // streams close exactly when the last worker returns.
            drop((work_rx, domain_tx, error_tx));
            let aggregator = spawn_named(scope, "aggregator".to_string(), move || {
                Aggregator::new(logger).run(&domain_rx, &error_rx)
            })?;

            let read = join(producer)?;
            self.advance(PipelineState::Draining);
            for worker in workers {
                join(worker)?;
            }
            let aggregation = join(aggregator)?;
            Ok((read, aggregation))
        })?;
        self.advance(PipelineState::Aggregated);

        let Aggregation {
            counts,
            valid_records,
            invalid_records,
        } = aggregation;
        let report = SortedReport::from(counts);
        self.advance(PipelineState::Reported);

        for entry in &report {
            logger.info(&format!(
                "Sorted domain. domain_name={} occurrences={}",
                entry.domain, entry.count
            ));
        }

        let summary = RunSummary {
            records_read: read.sent,
            valid_records,
            invalid_records,
            read_errors: read.read_errors,
            elapsed: started.elapsed(),
        };
        logger.info(&format!(
            "Import finished. records={} valid={} invalid={} read_errors={} domains={} time_taken_ms={}",
            summary.records_read,
            summary.valid_records,
            summary.invalid_records,
            summary.read_errors,
            report.len(),
            summary.elapsed.as_millis()
        ));
        self.advance(PipelineState::Terminal);

        Ok(RunResult { report, summary })
    }
}

/// Feed every readable record to the work queue; unreadable lines are logged
/// and skipped. Dropping `work` on return closes the queue.
fn produce<R: Read>(
    mut source: RecordSource<R>,
    work: &Sender<RawRecord>,
    logger: &dyn Logger,
) -> ReadStats {
    let mut stats = ReadStats::default();
    loop {
        match source.next_record() {
            Ok(Some(record)) => {
                if work.send(record).is_err() {
                    break;
                }
                stats.sent += 1;
            }
            Ok(None) => break,
            Err(err) => {
                stats.read_errors += 1;
                logger.warn(&format!("The reader failed while reading the file: {err}"));
            }
        }
    }
    stats
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> Result<T> {
    let name = handle.thread().name().unwrap_or("unnamed").to_string();
    handle.join().map_err(|_| EngineError::ThreadPanicked(name))
}

/// Single-threaded reference scan: same reader, extractor and fold, no queues.
///
/// # Errors
/// Same startup errors as [`Pipeline::run`].
pub fn scan_sequential(config: &Config, logger: &dyn Logger) -> Result<RunResult> {
    config.validate()?;
    let started = Instant::now();
    let mut source = RecordSource::open(&config.input_path, config.read_buffer_size)?;
    let mut aggregator = Aggregator::new(logger);
    let mut read = ReadStats::default();

    loop {
        match source.next_record() {
            Ok(Some(record)) => {
                read.sent += 1;
                match extract(&record) {
                    Ok(domain) => aggregator.record_domain(DomainEvent::single(domain)),
                    Err(error) => aggregator.record_error(&ErrorEvent::from(error)),
                }
            }
            Ok(None) => break,
            Err(err) => {
                read.read_errors += 1;
                logger.warn(&format!("The reader failed while reading the file: {err}"));
            }
        }
    }

    let aggregation = aggregator.finish();
    Ok(RunResult {
        summary: RunSummary {
            records_read: read.sent,
            valid_records: aggregation.valid_records,
            invalid_records: aggregation.invalid_records,
            read_errors: read.read_errors,
            elapsed: started.elapsed(),
        },
        report: SortedReport::from(aggregation.counts),
    })
}
