//! Response definitions
//!
//! Represents lines received from the daemon.

/// First status code that marks an asynchronous event rather than a reply
pub const EVENT_CODE_THRESHOLD: u32 = 300;

/// A parsed response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Protocol version reported by the daemon
    pub version: String,

    /// Status code (0 means success)
    pub code: u32,

    /// Human-readable description
    pub description: String,

    /// Any trailing `/`-separated fields, kept opaque and in order
    pub extra: Vec<String>,
}

impl Response {
    /// True for unsolicited daemon events (code >= 300)
    pub fn is_event(&self) -> bool {
        self.code >= EVENT_CODE_THRESHOLD
    }

    /// True for a successful synchronous reply
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}
