use std::num::NonZeroUsize;
use std::thread;

/// IngestRequest - Options for one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    /// Number of decode/normalize workers; `None` uses the available parallelism
    pub workers: Option<NonZeroUsize>,
}

impl IngestRequest {
    pub fn new(workers: Option<NonZeroUsize>) -> Self {
        Self { workers }
    }

    /// Effective worker count, never more than there are sources
    pub fn worker_count(&self, source_count: usize) -> usize {
        let requested = self
            .workers
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get);
        requested.min(source_count).max(1)
    }
}
