//! Copy dialog controller: the environment-copy state machine.
//!
//! Owns every transition of the workflow — loading the destination catalog,
//! target selection, optional credential capture, the copy invocation, and
//! the terminal result. Frontends render its state and forward operator
//! input; they never drive the remote service directly.

use crate::config::{DialogOptions, EndpointConfig};
use crate::error::WorkflowError;
use crate::host::{DialogLifecycle, HostEffects, IdentityContext};
use crate::remote::{CopyRequest, CopyService};
use crate::types::{CopyTarget, Credentials, WorkflowContext};

/// Invocation parameters the trigger panel passes when opening the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogParameters {
    /// The entry to replicate.
    pub entry_id: String,
}

/// Where the workflow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPhase {
    /// Constructed, not yet opened.
    Idle,
    /// Fetching the destination catalog.
    LoadingCatalog,
    /// Interactive: operator picks a target and optionally credentials.
    Ready,
    /// Copy request in flight.
    Submitting,
    /// Copy completed; the dialog has closed.
    Succeeded,
    /// The catalog load failed; only dismissal remains.
    Failed(WorkflowError),
}

/// Result of a [`CopyDialog::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The copy succeeded and the dialog closed.
    Completed,
    /// The copy failed; the dialog is back in `Ready` for a retry.
    Retry,
    /// Submission was refused because the enablement conditions do not hold.
    NotReady,
}

/// The copy workflow state machine.
///
/// All collaborators arrive at construction: the immutable workflow context,
/// the read-only endpoint config, the remote service, the host effect
/// surface, and the lifecycle hooks. Everything is discarded with the value
/// when the dialog closes; nothing is cached across invocations.
pub struct CopyDialog<S, E, L = ()>
where
    S: CopyService,
    E: HostEffects,
    L: DialogLifecycle,
{
    context: WorkflowContext,
    endpoints: EndpointConfig,
    options: DialogOptions,
    service: S,
    effects: E,
    lifecycle: L,
    phase: DialogPhase,
    catalog: Vec<String>,
    selection: Option<CopyTarget>,
    credentials: Credentials,
    last_error: Option<WorkflowError>,
    closed: bool,
}

impl<S, E, L> CopyDialog<S, E, L>
where
    S: CopyService,
    E: HostEffects,
    L: DialogLifecycle,
{
    pub fn new(
        params: DialogParameters,
        identity: &IdentityContext,
        endpoints: EndpointConfig,
        options: DialogOptions,
        service: S,
        effects: E,
        lifecycle: L,
    ) -> Self {
        Self {
            context: WorkflowContext {
                entry_id: params.entry_id,
                source_environment_id: identity.environment_id.clone(),
            },
            endpoints,
            options,
            service,
            effects,
            lifecycle,
            phase: DialogPhase::Idle,
            catalog: Vec::new(),
            selection: None,
            credentials: Credentials::default(),
            last_error: None,
            closed: false,
        }
    }

    // --- Accessors ---

    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    pub fn phase(&self) -> &DialogPhase {
        &self.phase
    }

    /// Ordered destination catalog as the server returned it.
    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn selection(&self) -> Option<&CopyTarget> {
        self.selection.as_ref()
    }

    /// The most recent failure, kept for display while the operator retries.
    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    /// A request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            DialogPhase::LoadingCatalog | DialogPhase::Submitting
        )
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // --- Opening: catalog load ---

    /// Run the dialog's entry sequence: fire the open hook, load the
    /// destination catalog, and default-select its first element.
    ///
    /// A missing listing URL fails without any network call. In every
    /// outcome the host is asked to reflow, since the rendered height
    /// depends on whether the selector has options or an error is shown.
    pub async fn open(&mut self) {
        self.lifecycle.on_open();
        self.phase = DialogPhase::LoadingCatalog;

        match self.load_catalog().await {
            Ok(catalog) => {
                self.selection = catalog.first().cloned().map(CopyTarget::Environment);
                self.catalog = catalog;
                self.phase = DialogPhase::Ready;
            }
            Err(err) => {
                self.effects.notify_error(&err.to_string());
                self.phase = DialogPhase::Failed(err);
            }
        }

        self.effects.request_reflow();
    }

    async fn load_catalog(&self) -> Result<Vec<String>, WorkflowError> {
        let endpoint = self.endpoints.list_environments_url()?;
        self.service
            .list_environments(
                endpoint,
                &self.context.entry_id,
                &self.context.source_environment_id,
            )
            .await
    }

    // --- Ready: selection and credential edits ---

    /// Change the destination. No network effect.
    pub fn select_target(&mut self, target: CopyTarget) {
        self.selection = Some(target);
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.credentials.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.credentials.password = password.into();
    }

    /// Whether the confirm action is currently enabled: the dialog is
    /// interactive, a target is selected, and — when the deployment
    /// requires credentials — both fields are non-empty.
    pub fn confirm_enabled(&self) -> bool {
        matches!(self.phase, DialogPhase::Ready)
            && self.selection.is_some()
            && (!self.options.require_credentials || self.credentials.is_complete())
    }

    // --- Submitting: the copy invocation ---

    /// Invoke the copy against the remote endpoint.
    ///
    /// On success the host is notified naming the target and the dialog
    /// closes. On failure the most specific message is surfaced and the
    /// dialog returns to `Ready` with selection and credentials intact, so
    /// the operator can retry without reloading the catalog. The busy state
    /// clears on every exit path.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.confirm_enabled() {
            return SubmitOutcome::NotReady;
        }
        let Some(target) = self.selection.clone() else {
            return SubmitOutcome::NotReady;
        };

        self.phase = DialogPhase::Submitting;

        match self.perform_copy(&target).await {
            Ok(()) => {
                self.effects
                    .notify_success(&format!("Entry copied to {}", target.label()));
                self.phase = DialogPhase::Succeeded;
                self.close();
                SubmitOutcome::Completed
            }
            Err(err) => {
                self.effects.notify_error(&err.to_string());
                self.last_error = Some(err);
                self.phase = DialogPhase::Ready;
                SubmitOutcome::Retry
            }
        }
    }

    async fn perform_copy(&self, target: &CopyTarget) -> Result<(), WorkflowError> {
        let endpoint = self.endpoints.copy_entry_url()?;
        let request = CopyRequest {
            entry_id: self.context.entry_id.clone(),
            source_env: self.context.source_environment_id.clone(),
            target: target.clone(),
            credentials: self
                .options
                .require_credentials
                .then(|| self.credentials.clone()),
        };
        self.service.copy_entry(endpoint, &request).await
    }

    // --- Closing ---

    /// Operator dismissal. Safe in any phase; the close hook fires once.
    pub fn dismiss(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.lifecycle.on_close();
        }
    }
}
