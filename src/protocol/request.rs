//! Request definitions
//!
//! Represents requests sent to the notification daemon.

/// Request actions understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    AddClass,
    Notification,
    Unregister,
}

impl Action {
    /// Wire name used in the `action=` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Register => "register",
            Action::AddClass => "add_class",
            Action::Notification => "notification",
            Action::Unregister => "unregister",
        }
    }
}

/// A request to send to the daemon
///
/// Fields keep their insertion order so the encoded bytes are deterministic.
/// `action` is always the first field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    action: Action,
    fields: Vec<(String, String)>,
}

impl Request {
    /// Create a request carrying only the `action` field
    pub fn new(action: Action) -> Self {
        Self {
            action,
            fields: vec![("action".to_string(), action.as_str().to_string())],
        }
    }

    /// Append a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Get the request action
    pub fn action(&self) -> Action {
        self.action
    }

    /// All fields, `action` included, in insertion order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Look up the first field with the given name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
