/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod catalog_query_port;

pub use catalog_query_port::CatalogQueryPort;
