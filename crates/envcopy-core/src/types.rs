//! Shared workflow types: copy context, destination targets, credentials.

use std::fmt;

/// Identity of the copy operation, fixed for the dialog's lifetime.
///
/// The entry id arrives through the dialog's invocation parameters; the
/// source environment id is read from the host shell's identity context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowContext {
    /// The content entry being replicated.
    pub entry_id: String,
    /// The environment the entry is copied from.
    pub source_environment_id: String,
}

/// The chosen copy destination: one environment, or all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// A single destination environment, by identifier.
    Environment(String),
    /// Every environment the service knows about.
    AllEnvironments,
}

impl CopyTarget {
    /// Wire value of the all-environments sentinel, as the copy endpoint
    /// expects it in the `targetEnv` query parameter.
    pub const ALL_SENTINEL: &'static str = "ALL";

    /// Value sent as the `targetEnv` query parameter.
    pub fn as_query_value(&self) -> &str {
        match self {
            CopyTarget::Environment(id) => id,
            CopyTarget::AllEnvironments => Self::ALL_SENTINEL,
        }
    }

    /// Operator-facing name of the destination.
    pub fn label(&self) -> &str {
        match self {
            CopyTarget::Environment(id) => id,
            CopyTarget::AllEnvironments => "all environments",
        }
    }
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// HTTP Basic credentials entered by the operator.
///
/// Held only for the dialog's lifetime. `Debug` redacts the password so the
/// value can never leak through log output or formatted errors.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields non-empty, as the credential-requiring variant demands.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_query_value_uses_all_sentinel() {
        let target = CopyTarget::Environment("staging".to_string());
        assert_eq!(target.as_query_value(), "staging");

        assert_eq!(CopyTarget::AllEnvironments.as_query_value(), "ALL");
    }

    #[test]
    fn target_label_is_operator_facing() {
        assert_eq!(
            CopyTarget::Environment("master".to_string()).label(),
            "master"
        );
        assert_eq!(CopyTarget::AllEnvironments.label(), "all environments");
    }

    #[test]
    fn credentials_complete_requires_both_fields() {
        assert!(!Credentials::default().is_complete());
        assert!(!Credentials::new("ops", "").is_complete());
        assert!(!Credentials::new("", "s3cret").is_complete());
        assert!(Credentials::new("ops", "s3cret").is_complete());
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("ops", "s3cret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("ops"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("s3cret"));
    }
}
