/// Ports module defining interfaces for hexagonal architecture
///
/// Inbound ports are the query API the CLI drives; outbound ports are the
/// file system, snapshot storage, console and rendering seams the use cases
/// depend on.
pub mod inbound;
pub mod outbound;
