//! Store scope: the namespace a store instance reads and writes in.

use serde::{Deserialize, Serialize};

/// Service identifier plus optional sharing group.
///
/// Stores bound to different scopes never observe each other's entries.
/// A scope with an access group is distinct from the same service without one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreScope {
    service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_group: Option<String>,
}

impl StoreScope {
    /// Create a scope for the given service identifier.
    ///
    /// The service identifier should be your app's bundle identifier or
    /// a unique string namespacing its credentials.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            access_group: None,
        }
    }

    /// Set the access group for cross-process sharing on the same device.
    pub fn with_access_group(mut self, group: impl Into<String>) -> Self {
        self.access_group = Some(group.into());
        self
    }

    /// Get the service identifier.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Get the access group if set.
    pub fn access_group(&self) -> Option<&str> {
        self.access_group.as_deref()
    }
}

impl std::fmt::Display for StoreScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.access_group {
            Some(group) => write!(f, "{}@{}", self.service, group),
            None => f.write_str(&self.service),
        }
    }
}
