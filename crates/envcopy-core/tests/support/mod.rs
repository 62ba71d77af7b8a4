//! Shared fakes for driving the copy workflow without a host or network.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use envcopy_core::error::WorkflowError;
use envcopy_core::host::{DialogLifecycle, HostEffects};
use envcopy_core::remote::{CopyRequest, CopyService};

/// Run a workflow future on a current-thread runtime, matching the
/// single-actor execution model of the embedding host.
pub fn run<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
        .block_on(future)
}

/// A notification the fake shell observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Default)]
struct ShellLog {
    notifications: Vec<Notification>,
    reflows: usize,
    opens: usize,
    closes: usize,
}

/// Host-shell fake recording every effect and lifecycle hook.
///
/// Clones share the same log, so a test can keep a handle while the dialog
/// owns another.
#[derive(Clone, Default)]
pub struct RecordingShell {
    log: Rc<RefCell<ShellLog>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().notifications.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.log
            .borrow()
            .notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message.clone()),
                Notification::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.log
            .borrow()
            .notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Success(message) => Some(message.clone()),
                Notification::Error(_) => None,
            })
            .collect()
    }

    pub fn reflows(&self) -> usize {
        self.log.borrow().reflows
    }

    pub fn opens(&self) -> usize {
        self.log.borrow().opens
    }

    pub fn closes(&self) -> usize {
        self.log.borrow().closes
    }
}

impl HostEffects for RecordingShell {
    fn notify_success(&mut self, message: &str) {
        self.log
            .borrow_mut()
            .notifications
            .push(Notification::Success(message.to_string()));
    }

    fn notify_error(&mut self, message: &str) {
        self.log
            .borrow_mut()
            .notifications
            .push(Notification::Error(message.to_string()));
    }

    fn request_reflow(&mut self) {
        self.log.borrow_mut().reflows += 1;
    }
}

impl DialogLifecycle for RecordingShell {
    fn on_open(&mut self) {
        self.log.borrow_mut().opens += 1;
    }

    fn on_close(&mut self) {
        self.log.borrow_mut().closes += 1;
    }
}

/// A recorded catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCall {
    pub endpoint: String,
    pub entry_id: String,
    pub source_env: String,
}

#[derive(Default)]
struct FakeServiceState {
    catalog_response: Option<Result<Vec<String>, WorkflowError>>,
    copy_response: Option<Result<(), WorkflowError>>,
    catalog_calls: Vec<CatalogCall>,
    copy_calls: Vec<(String, CopyRequest)>,
}

/// Scripted stand-in for the remote copy service.
#[derive(Clone, Default)]
pub struct FakeService {
    state: Rc<RefCell<FakeServiceState>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose catalog request succeeds with the given environments
    /// and whose copy request succeeds.
    pub fn with_catalog(environments: &[&str]) -> Self {
        let service = Self::new();
        service.script_catalog(Ok(environments.iter().map(|e| e.to_string()).collect()));
        service.script_copy(Ok(()));
        service
    }

    pub fn script_catalog(&self, response: Result<Vec<String>, WorkflowError>) {
        self.state.borrow_mut().catalog_response = Some(response);
    }

    pub fn script_copy(&self, response: Result<(), WorkflowError>) {
        self.state.borrow_mut().copy_response = Some(response);
    }

    pub fn catalog_calls(&self) -> Vec<CatalogCall> {
        self.state.borrow().catalog_calls.clone()
    }

    pub fn copy_calls(&self) -> Vec<(String, CopyRequest)> {
        self.state.borrow().copy_calls.clone()
    }

    /// Total number of requests the fake observed, over both endpoints.
    pub fn request_count(&self) -> usize {
        let state = self.state.borrow();
        state.catalog_calls.len() + state.copy_calls.len()
    }
}

impl CopyService for FakeService {
    async fn list_environments(
        &self,
        endpoint: &str,
        entry_id: &str,
        source_env: &str,
    ) -> Result<Vec<String>, WorkflowError> {
        let mut state = self.state.borrow_mut();
        state.catalog_calls.push(CatalogCall {
            endpoint: endpoint.to_string(),
            entry_id: entry_id.to_string(),
            source_env: source_env.to_string(),
        });
        state
            .catalog_response
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn copy_entry(&self, endpoint: &str, request: &CopyRequest) -> Result<(), WorkflowError> {
        let mut state = self.state.borrow_mut();
        state
            .copy_calls
            .push((endpoint.to_string(), request.clone()));
        state.copy_response.clone().unwrap_or_else(|| Ok(()))
    }
}
