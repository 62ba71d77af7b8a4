//! Entry-scoped trigger that launches the copy dialog.

use crate::dialog::DialogParameters;
use crate::host::{HostEffects, IdentityContext};

/// The call-to-action surface bound to the current entry.
///
/// Reads the entry id from the host identity once at construction and
/// exposes a single operation: open the copy dialog with that entry. The
/// panel does not act on the dialog's result; it only guarantees its own
/// busy indicator is cleared however the dialog ends.
pub struct TriggerPanel<E: HostEffects> {
    entry_id: String,
    busy: bool,
    effects: E,
}

impl<E: HostEffects> TriggerPanel<E> {
    pub fn new(identity: &IdentityContext, effects: E) -> Self {
        Self {
            entry_id: identity.entry_id.clone(),
            busy: false,
            effects,
        }
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// Apply an entry change reported by the host shell.
    pub fn set_entry_id(&mut self, entry_id: impl Into<String>) {
        self.entry_id = entry_id.into();
    }

    /// The modal is currently open.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Open the copy dialog and await its closure.
    ///
    /// `open_dialog` receives the invocation parameters and runs the modal
    /// to completion. An error opening the modal is surfaced through the
    /// host's error notification; the busy flag clears on every exit path.
    pub async fn invoke_copy_flow<F, Fut>(&mut self, open_dialog: F)
    where
        F: FnOnce(DialogParameters) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let params = DialogParameters {
            entry_id: self.entry_id.clone(),
        };

        self.busy = true;
        let result = open_dialog(params).await;
        self.busy = false;

        if let Err(err) = result {
            self.effects.notify_error(&format!("{err:#}"));
        }
    }
}
