//! Network Module
//!
//! Connection handling for the daemon socket.
//!
//! ## Model
//! - One blocking connection per client
//! - Strict request/response, no pipelining
//! - Events (code >= 300) are queued while waiting for a reply

mod connection;

pub use connection::Connection;
