//! Envcopy Core Library
//!
//! Provides the domain logic for replicating a single content entry across
//! environments of a multi-environment content system, driven from an
//! embedding host shell (trigger panel + copy dialog).

pub mod config;
pub mod dialog;
pub mod error;
pub mod host;
pub mod panel;
pub mod remote;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{AppConfig, ConfigStore, DialogOptions, EndpointConfig};

    // Workflow
    pub use crate::dialog::{CopyDialog, DialogParameters, DialogPhase, SubmitOutcome};
    pub use crate::panel::TriggerPanel;

    // Host contracts
    pub use crate::host::{DialogLifecycle, HostEffects, IdentityContext};

    // Remote service
    pub use crate::remote::{CopyRequest, CopyService, HttpCopyService};

    // Shared types
    pub use crate::error::{EndpointKind, WorkflowError};
    pub use crate::types::{CopyTarget, Credentials, WorkflowContext};
}
