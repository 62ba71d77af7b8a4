//! Contracts for the embedding host shell.
//!
//! The workflow never talks to the host through an ambient SDK object.
//! Identity is a plain read-only value; side effects and lifecycle are
//! narrow traits, so the state machine can be driven with fakes in tests.

/// Read-only identity of the embedding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    /// The content entry currently in focus.
    pub entry_id: String,
    /// The environment the host is currently operating in.
    pub environment_id: String,
}

impl IdentityContext {
    pub fn new(entry_id: impl Into<String>, environment_id: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            environment_id: environment_id.into(),
        }
    }
}

/// Side-effect capabilities the host shell grants embedded components.
pub trait HostEffects {
    /// Show a transient success notification to the operator.
    fn notify_success(&mut self, message: &str);

    /// Show a transient error notification to the operator.
    fn notify_error(&mut self, message: &str);

    /// Ask the host to recompute the rendered height of the embedded view.
    /// Called after the catalog load resolves either way, since the content
    /// height depends on whether options or an error message are shown.
    fn request_reflow(&mut self);
}

/// Lifecycle hooks the dialog controller registers once at construction.
pub trait DialogLifecycle {
    /// The dialog became visible and started loading.
    fn on_open(&mut self);

    /// The dialog closed, on success or operator dismissal.
    fn on_close(&mut self);
}

/// Hook-less lifecycle for frontends that have nothing to tear down.
impl DialogLifecycle for () {
    fn on_open(&mut self) {}
    fn on_close(&mut self) {}
}
