//! Storage implementations for different backends

pub mod credentials;
pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use credentials::ConfiguredCredentials;
pub use in_memory::InMemoryInvoiceStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresInvoiceStore;
