//! Persistence layer: client-local key-value storage for stepper state.

#[cfg(test)]
pub(crate) mod failing;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::SettingsStore;
