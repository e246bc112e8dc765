//! Client Module
//!
//! The public SNP client: register an application, declare notification
//! classes, send notifications and unregister.
//!
//! ## Lifecycle
//! ```text
//! register ──► add_class* ──► notify* ──► close
//!                                           │
//!        (dropped without close) ───────────┴──► best-effort unregister
//! ```

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{Result, SnarlError};
use crate::network::Connection;
use crate::protocol::{check_field_value, Action, Request, Response};

/// A registered SNP application
///
/// Calls block until the daemon replies and must be serialized by the
/// caller. Call [`SnarlClient::close`] when done; if the client is dropped
/// instead, an unregister line is still sent without waiting for a reply.
pub struct SnarlClient<R: BufRead = BufReader<TcpStream>, W: Write = BufWriter<TcpStream>> {
    connection: Connection<R, W>,
    app_name: String,
    closed: bool,
}

impl SnarlClient {
    /// Register `app_name` with the daemon on the default host and port
    pub fn register(app_name: impl Into<String>) -> Result<Self> {
        let config = Config::builder().app_name(app_name).build();
        Self::register_with_config(&config)
    }

    /// Register with the daemon described by `config`
    pub fn register_with_config(config: &Config) -> Result<Self> {
        require("application name", &config.app_name)?;
        let connection = Connection::open(config)?;
        Self::handshake(connection, &config.app_name)
    }

    /// Register, run `f`, then close the client on every exit path
    ///
    /// An error from `f` takes precedence over an error from closing.
    pub fn scoped<T, F>(config: &Config, f: F) -> Result<T>
    where
        F: FnOnce(&mut SnarlClient) -> Result<T>,
    {
        let mut client = Self::register_with_config(config)?;
        let result = f(&mut client);
        let closed = client.close();
        match result {
            Ok(value) => closed.map(|()| value),
            Err(e) => {
                if let Err(close_err) = closed {
                    tracing::warn!("Ignoring close failure after error: {}", close_err);
                }
                Err(e)
            }
        }
    }
}

impl<R: BufRead, W: Write> SnarlClient<R, W> {
    /// Register over an already-established reader/writer pair
    pub fn register_over(config: &Config, reader: R, writer: W) -> Result<Self> {
        require("application name", &config.app_name)?;
        let connection = Connection::from_parts(reader, writer, config.protocol_version.clone());
        Self::handshake(connection, &config.app_name)
    }

    fn handshake(mut connection: Connection<R, W>, app_name: &str) -> Result<Self> {
        let request = Request::new(Action::Register).field("app", app_name);
        let response = connection.exchange(&request)?;
        if !response.is_ok() {
            return Err(SnarlError::Registration(response.description));
        }

        tracing::info!("Registered {} with {}", app_name, connection.peer_addr());
        Ok(Self {
            connection,
            app_name: app_name.to_string(),
            closed: false,
        })
    }

    /// Declare a notification class; `title` falls back to `class`
    pub fn add_class(&mut self, class: &str, title: Option<&str>) -> Result<()> {
        require("class", class)?;
        let title = title.filter(|t| !t.is_empty()).unwrap_or(class);
        check_field_value("title", title)?;

        let request = Request::new(Action::AddClass)
            .field("app", self.app_name.as_str())
            .field("class", class)
            .field("title", title);
        let response = self.connection.exchange(&request)?;
        if !response.is_ok() {
            return Err(SnarlError::ClassRegistration(response.description));
        }
        Ok(())
    }

    /// Show a notification
    ///
    /// `timeout` is in seconds; `None` or 0 keeps it on screen until dismissed.
    pub fn notify(&mut self, class: &str, title: &str, text: &str, timeout: Option<u32>) -> Result<()> {
        require("class", class)?;
        require("title", title)?;
        require("text", text)?;

        let request = Request::new(Action::Notification)
            .field("app", self.app_name.as_str())
            .field("class", class)
            .field("title", title)
            .field("text", text)
            .field("timeout", timeout.unwrap_or(0).to_string());
        let response = self.connection.exchange(&request)?;
        if !response.is_ok() {
            return Err(SnarlError::Notification(response.description));
        }
        Ok(())
    }

    /// Unregister and release the connection
    pub fn close(mut self) -> Result<()> {
        // Drop runs after this returns; never unregister twice
        self.closed = true;
        let request = self.unregister_request();
        let response = self.connection.exchange(&request)?;
        if !response.is_ok() {
            return Err(SnarlError::Unregistration(response.description));
        }
        tracing::info!("Unregistered {}", self.app_name);
        Ok(())
    }

    /// Registered application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Asynchronous events received so far, oldest first.
    /// Nothing consumes them.
    pub fn pending_events(&self) -> impl Iterator<Item = &Response> {
        self.connection.events().iter()
    }

    pub fn pending_event_count(&self) -> usize {
        self.connection.events().len()
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection<R, W> {
        &self.connection
    }

    fn unregister_request(&self) -> Request {
        Request::new(Action::Unregister).field("app", self.app_name.as_str())
    }
}

impl<R: BufRead, W: Write> Drop for SnarlClient<R, W> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let request = self.unregister_request();
        if let Err(e) = self.connection.send(&request) {
            tracing::warn!("Best-effort unregister of {} failed: {}", self.app_name, e);
        }
    }
}

/// Non-empty and free of framing sequences
fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SnarlError::Validation(format!("{} is required", name)));
    }
    check_field_value(name, value)
}
