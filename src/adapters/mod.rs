/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: file system access,
/// snapshot persistence, console progress and output rendering. The CLI in
/// `main.rs` is the only inbound adapter.
pub mod outbound;
