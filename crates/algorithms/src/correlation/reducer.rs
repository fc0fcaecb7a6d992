//! Parallel reduction of a corpus into one correlation table
//!
//! A fixed pool of workers claims contiguous chunks of samples from a shared
//! cursor. Each worker accumulates into a table it owns outright and, once
//! the cursor is exhausted, merges that table into the shared one under a
//! single mutex. Integer sums make the result identical for every worker
//! count and chunk size.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use sigcorr_api::{validate, Error, Result};
use tracing::{debug, info};

use super::table::CorrelationTable;
use crate::samples::SampleSet;

/// Samples claimed per dispatch
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// Worker pool settings for a reduction pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReducerConfig {
    workers: usize,
    chunk_size: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ReducerConfig {
    /// Set the number of workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the number of samples claimed per dispatch
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Number of workers
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Samples per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// Reduces sample sets into correlation tables on a dedicated thread pool
pub struct CorrelationReducer {
    config: ReducerConfig,
    pool: rayon::ThreadPool,
    stop: Arc<AtomicBool>,
}

impl CorrelationReducer {
    /// Build the worker pool
    pub fn new(config: ReducerConfig) -> Result<Self> {
        validate::parameter(
            config.workers > 0,
            "correlation reducer",
            "worker count must be positive",
        )?;
        validate::parameter(
            config.chunk_size > 0,
            "correlation reducer",
            "chunk size must be positive",
        )?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("sigcorr-reducer-{}", i))
            .build()
            .map_err(|e| Error::config("correlation reducer", e.to_string()))?;
        Ok(Self {
            config,
            pool,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Pool settings
    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Flag that stops the dispatch of new chunks when set
    ///
    /// Chunks already claimed still finish and merge, so the shared table
    /// always describes a whole number of samples. The flag stays set until
    /// cleared by the caller.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Reduce the first `width` columns of every sample into a fresh table
    pub fn reduce(&self, samples: &SampleSet, width: usize) -> Result<CorrelationTable> {
        let mut table = CorrelationTable::new(width)?;
        self.reduce_into(&mut table, samples)?;
        Ok(table)
    }

    /// Accumulate `samples` into an existing table
    ///
    /// Returns the number of samples added. On error the contents of
    /// `shared` are unspecified and the table must be discarded.
    pub fn reduce_into(&self, shared: &mut CorrelationTable, samples: &SampleSet) -> Result<u64> {
        let width = shared.len();
        validate::min_length("correlation sample", samples.code_len(), width)?;

        let total = samples.len();
        if total == 0 {
            return Ok(0);
        }

        let chunk_size = self.config.chunk_size;
        let workers = self.config.workers.min((total + chunk_size - 1) / chunk_size);
        let before = shared.samples();
        let started = Instant::now();
        info!(samples = total, width, workers, chunk_size, "correlation pass started");

        let cursor = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let failure: Mutex<Option<Error>> = Mutex::new(None);

        {
            let guarded = Mutex::new(&mut *shared);

            let cursor = &cursor;
            let abort = &abort;
            let failure = &failure;
            let guarded = &guarded;
            let stop = &*self.stop;

            self.pool.scope(|scope| {
                for worker in 0..workers {
                    scope.spawn(move |_| {
                        let mut local = match CorrelationTable::new(width) {
                            Ok(table) => table,
                            Err(e) => {
                                abort.store(true, Ordering::Relaxed);
                                failure
                                    .lock()
                                    .unwrap_or_else(PoisonError::into_inner)
                                    .get_or_insert(e);
                                return;
                            }
                        };

                        while !stop.load(Ordering::Relaxed) && !abort.load(Ordering::Relaxed) {
                            let start = cursor.fetch_add(chunk_size, Ordering::Relaxed);
                            if start >= total {
                                break;
                            }
                            let end = (start + chunk_size).min(total);
                            for i in start..end {
                                local.accumulate_unchecked(samples.sample(i));
                            }
                        }

                        let mut table = guarded.lock().unwrap_or_else(PoisonError::into_inner);
                        // Widths are equal by construction
                        if let Err(e) = table.merge(&local) {
                            abort.store(true, Ordering::Relaxed);
                            failure
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .get_or_insert(e);
                            return;
                        }
                        debug!(worker, samples = local.samples(), "merged private table");
                    });
                }
            });
        }

        if let Some(e) = failure.lock().unwrap_or_else(PoisonError::into_inner).take() {
            return Err(e);
        }

        let added = shared.samples() - before;
        info!(
            added,
            total = shared.samples(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "correlation pass finished"
        );
        Ok(added)
    }
}

impl core::fmt::Debug for CorrelationReducer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CorrelationReducer")
            .field("config", &self.config)
            .field("stopped", &self.stop.load(Ordering::Relaxed))
            .finish()
    }
}
