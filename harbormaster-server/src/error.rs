//! Error types for the Harbormaster server.

use std::{error::Error, fmt};

/// Error type for registry store and export operations.
#[derive(Debug)]
pub enum RegistryError {
    /// The requested ship id is absent from the store.
    NotFound(i32),
    /// A fleet export was requested against an empty registry.
    EmptyRegistry,
    /// The underlying storage failed; detail is logged, not sent to clients.
    Storage(String),
    /// Export rendering failed.
    Export(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::EmptyRegistry => write!(f, "fleet registry is empty"),
            Self::Storage(message) => write!(f, "storage failure: {message}"),
            Self::Export(message) => write!(f, "export failure: {message}"),
        }
    }
}

impl Error for RegistryError {}

impl RegistryError {
    /// Wrap a storage-layer error, preserving its detail for logs.
    pub fn storage(err: impl fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<harbormaster_core::ExportError> for RegistryError {
    fn from(err: harbormaster_core::ExportError) -> Self {
        Self::Export(err.to_string())
    }
}
