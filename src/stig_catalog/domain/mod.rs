pub mod benchmark;
pub mod catalog;
pub mod rule;

pub use benchmark::{Benchmark, BenchmarkDraft, BenchmarkIndex};
pub use catalog::{Catalog, Collection, Snapshot, SNAPSHOT_FORMAT_VERSION};
pub use rule::{Rule, RuleDraft, Severity};
