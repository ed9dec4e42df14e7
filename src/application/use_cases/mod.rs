/// Use cases module containing application business logic orchestration
mod ingest_benchmarks;
mod query_catalog;

pub use ingest_benchmarks::IngestBenchmarksUseCase;
pub use query_catalog::QueryCatalogUseCase;
