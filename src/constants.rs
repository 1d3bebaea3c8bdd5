/// Constants used by mask generation defaults.
pub mod mask {
    /// Default target long-run fraction of positions to mask.
    pub const DEFAULT_MASKING_RATIO: f64 = 0.15;
    /// Default mean length of masked runs (geometric distribution only).
    pub const DEFAULT_MEAN_RUN_LENGTH: f64 = 3.0;
    /// Default seed for mask-generation RNG streams.
    pub const DEFAULT_MASK_SEED: u64 = 42;
}

/// Constants used by batch loading defaults.
pub mod loader {
    /// Default number of samples per collated batch.
    pub const DEFAULT_BATCH_SIZE: usize = 128;
    /// Default seed for per-epoch shuffle order derivation.
    pub const DEFAULT_LOADER_SEED: u64 = 42;
    /// Default bound on batches queued ahead by the prefetcher.
    pub const DEFAULT_PREFETCH_CAPACITY: usize = 2;
}
