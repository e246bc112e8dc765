//! # snarl
//!
//! A synchronous client for the Snarl Network Protocol (SNP):
//! - Line-oriented `name=value` requests over TCP
//! - Single-line `SNP/...` responses
//! - Asynchronous daemon events (code >= 300) queued apart from replies
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SnarlClient                            │
//! │         register / add_class / notify / close                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Connection                             │
//! │        send line ──► read lines until code < 300             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │ Event Queue │
//!   │ (SNP lines) │          │  (>= 300)   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use snarl::{Config, SnarlClient};
//!
//! let config = Config::builder().app_name("MyApp").build();
//! SnarlClient::scoped(&config, |client| {
//!     client.add_class("Test", None)?;
//!     client.notify("Test", "Hello", "World", None)
//! })?;
//! # Ok::<(), snarl::SnarlError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SnarlError, Result};
pub use config::Config;
pub use client::SnarlClient;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
