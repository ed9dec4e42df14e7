/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach benchmark sources, the persisted snapshot and the console.
pub mod benchmark_source;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod snapshot_repository;

pub use benchmark_source::BenchmarkSource;
pub use formatter::CatalogFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use snapshot_repository::SnapshotRepository;
