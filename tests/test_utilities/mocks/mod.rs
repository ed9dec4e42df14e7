/// Mock implementations for testing
mod mock_benchmark_source;
mod mock_progress_reporter;
mod mock_snapshot_repository;

pub use mock_benchmark_source::MockBenchmarkSource;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_snapshot_repository::MockSnapshotRepository;
