/// Catalog domain layer
///
/// `domain` holds the canonical Benchmark/Rule model and the indexed catalog;
/// `services` holds the pure decode and normalization logic that turns
/// XCCDF documents into that model. Nothing here performs I/O.
pub mod domain;
pub mod services;
