use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::collate::collate;
use crate::config::LoaderConfig;
use crate::data::ImputationBatch;
use crate::dataset::SampleSet;
use crate::errors::MaskError;
use crate::rng::DeterministicRng;

/// Epoch-aware batch loader over a [`SampleSet`].
///
/// Each epoch visits every sample exactly once, in an order re-derived from
/// `seed ^ epoch` when shuffling is on, so any epoch is reproducible in
/// isolation. The final batch of an epoch may be shorter than `batch_size`;
/// the next call starts the following epoch.
pub struct BatchLoader<L> {
    set: SampleSet<L>,
    config: LoaderConfig,
    order: Vec<usize>,
    cursor: usize,
    epoch: u64,
}

impl<L: Clone> BatchLoader<L> {
    /// Build a loader; rejects a zero batch size.
    pub fn new(set: SampleSet<L>, config: LoaderConfig) -> Result<Self, MaskError> {
        if config.batch_size == 0 {
            return Err(MaskError::Configuration(
                "batch size must be positive".into(),
            ));
        }
        let mut loader = Self {
            order: Vec::new(),
            cursor: 0,
            epoch: 0,
            set,
            config,
        };
        loader.begin_epoch();
        Ok(loader)
    }

    fn begin_epoch(&mut self) {
        self.cursor = 0;
        self.order = (0..self.set.len()).collect();
        if self.config.shuffle {
            let mut rng = DeterministicRng::new(self.config.seed ^ self.epoch);
            self.order.shuffle(&mut rng);
        }
        debug!(
            epoch = self.epoch,
            samples = self.order.len(),
            "starting loader epoch"
        );
    }

    /// Produce the next collated batch, wrapping into a new epoch when the
    /// current one is exhausted.
    pub fn next_batch(&mut self) -> Result<ImputationBatch<L>, MaskError> {
        if self.cursor >= self.order.len() {
            self.epoch = self.epoch.saturating_add(1);
            self.begin_epoch();
        }
        let end = (self.cursor + self.config.batch_size).min(self.order.len());
        let mut drawn = Vec::with_capacity(end - self.cursor);
        for position in self.cursor..end {
            drawn.push(self.set.sample(self.order[position])?);
        }
        self.cursor = end;
        collate(drawn, &self.config.collate)
    }

    /// Zero-based index of the epoch the next batch will come from.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of batches one full epoch yields.
    pub fn batches_per_epoch(&self) -> usize {
        self.set.len().div_ceil(self.config.batch_size)
    }

    /// The underlying sample set.
    pub fn set(&self) -> &SampleSet<L> {
        &self.set
    }
}

/// Background prefetcher that fills a bounded queue with collated batches.
///
/// The producer (and the generators it owns) moves into the worker thread,
/// so no RNG is ever shared across threads; consumers only see finished
/// batches through the channel.
pub struct BatchPrefetcher<T> {
    receiver: Option<mpsc::Receiver<Result<T, MaskError>>>,
    handle: Option<thread::JoinHandle<()>>,
    stats: Arc<PrefetcherStats>,
}

#[derive(Default)]
struct PrefetcherStats {
    queued: AtomicUsize,
    produced: AtomicUsize,
    errors: AtomicUsize,
}

impl<T: Send + 'static> BatchPrefetcher<T> {
    /// Spawn a worker that keeps up to `capacity` results queued ahead.
    pub fn new<F>(capacity: usize, mut producer: F) -> Self
    where
        F: FnMut() -> Result<T, MaskError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(capacity.max(1));
        let stats = Arc::new(PrefetcherStats::default());
        let stats_thread = Arc::clone(&stats);
        let handle = thread::spawn(move || {
            loop {
                let result = producer();
                if result.is_err() {
                    stats_thread.errors.fetch_add(1, Ordering::Relaxed);
                }
                if sender.send(result).is_err() {
                    debug!("batch consumer dropped, stopping prefetch worker");
                    return;
                }
                stats_thread.queued.fetch_add(1, Ordering::Relaxed);
                stats_thread.produced.fetch_add(1, Ordering::Relaxed);
            }
        });
        Self {
            receiver: Some(receiver),
            handle: Some(handle),
            stats,
        }
    }

    /// Block until the next prefetched result is available.
    pub fn next(&self) -> Result<T, MaskError> {
        let receiver = self.receiver.as_ref().ok_or(MaskError::WorkerStopped)?;
        let result = receiver
            .recv()
            .unwrap_or_else(|_| Err(MaskError::WorkerStopped));
        self.stats
            .queued
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |value| {
                Some(value.saturating_sub(1))
            })
            .ok();
        result
    }

    /// Number of prefetched results currently queued.
    pub fn queue_len(&self) -> usize {
        self.stats.queued.load(Ordering::Relaxed)
    }

    /// Total number of results produced by the worker.
    pub fn produced_count(&self) -> usize {
        self.stats.produced.load(Ordering::Relaxed)
    }

    /// Total number of errors produced by the worker.
    pub fn error_count(&self) -> usize {
        self.stats.errors.load(Ordering::Relaxed)
    }
}

impl<L> BatchPrefetcher<ImputationBatch<L>>
where
    L: Clone + Send + 'static,
{
    /// Spawn a prefetcher that drives `loader` on the worker thread.
    pub fn for_loader(capacity: usize, mut loader: BatchLoader<L>) -> Self {
        Self::new(capacity, move || loader.next_batch())
    }
}

impl<T> Drop for BatchPrefetcher<T> {
    fn drop(&mut self) {
        self.receiver.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
