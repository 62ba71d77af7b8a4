//! Error taxonomy for the environment-copy workflow.
//!
//! Every variant is recoverable at the UI level: it ends the in-progress
//! sub-operation and leaves the dialog interactive. Nothing here is fatal
//! to the process.

use std::fmt;

use thiserror::Error;

/// Which operator-configured endpoint an operation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// The environment-listing endpoint.
    List,
    /// The entry-copy endpoint.
    Copy,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::List => "list",
            EndpointKind::Copy => "copy",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures the copy workflow can surface to the operator.
///
/// Causes are carried as pre-formatted text: the most specific message
/// available (server-supplied over generic transport) is extracted at the
/// HTTP boundary, so raw error objects never reach the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// A required endpoint URL is absent from the installation config.
    #[error("No {which} endpoint URL configured. Set it in the app configuration.")]
    ConfigurationMissing { which: EndpointKind },

    /// Listing destination environments failed (transport, status, or payload).
    #[error("Could not load destination environments: {cause}")]
    CatalogFetchFailed { cause: String },

    /// The copy request failed (transport or server-side).
    #[error("Copy failed: {cause}")]
    CopyFailed { cause: String },
}

impl WorkflowError {
    pub fn missing(which: EndpointKind) -> Self {
        WorkflowError::ConfigurationMissing { which }
    }

    pub fn catalog(cause: impl Into<String>) -> Self {
        WorkflowError::CatalogFetchFailed {
            cause: cause.into(),
        }
    }

    pub fn copy(cause: impl Into<String>) -> Self {
        WorkflowError::CopyFailed {
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_missing_names_the_endpoint() {
        let err = WorkflowError::missing(EndpointKind::List);
        assert!(err.to_string().contains("list endpoint URL"));

        let err = WorkflowError::missing(EndpointKind::Copy);
        assert!(err.to_string().contains("copy endpoint URL"));
    }

    #[test]
    fn causes_appear_in_operator_messages() {
        let err = WorkflowError::copy("lock conflict");
        assert!(err.to_string().contains("lock conflict"));

        let err = WorkflowError::catalog("HTTP 503 Service Unavailable");
        assert!(err.to_string().contains("503"));
    }
}
