//! Connection Handler
//!
//! Request/response exchange with the daemon over one line-oriented stream.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{Result, SnarlError};
use crate::protocol::{read_response, write_request, Request, Response};

/// A connection to the daemon
///
/// Generic over its line reader and writer so the exchange logic can run
/// against in-memory buffers as well as a socket.
pub struct Connection<R, W> {
    /// Line reader for daemon responses
    reader: R,

    /// Writer for outgoing requests
    writer: W,

    /// Version string written into each request
    protocol_version: String,

    /// Asynchronous events seen while waiting for replies, oldest first
    events: VecDeque<Response>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection<BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// Open a TCP connection to the configured daemon
    pub fn open(config: &Config) -> Result<Self> {
        let addr = config.addr();
        let stream = TcpStream::connect(&addr).map_err(|source| SnarlError::Connection {
            addr: addr.clone(),
            source,
        })?;

        // Requests are single small lines; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or(addr);

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            protocol_version: config.protocol_version.clone(),
            events: VecDeque::new(),
            peer_addr,
        })
    }
}

impl<R: BufRead, W: Write> Connection<R, W> {
    /// Wrap an existing reader/writer pair
    pub fn from_parts(reader: R, writer: W, protocol_version: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            protocol_version: protocol_version.into(),
            events: VecDeque::new(),
            peer_addr: "in-memory".to_string(),
        }
    }

    /// Write one request line
    pub fn send(&mut self, request: &Request) -> Result<()> {
        tracing::debug!("Sending {} to {}", request.action().as_str(), self.peer_addr);
        write_request(&mut self.writer, request, &self.protocol_version)
    }

    /// Read lines until a synchronous reply arrives
    ///
    /// Lines with code >= 300 are queued as events and skipped. There is no
    /// bound on how many events may precede the reply.
    pub fn receive(&mut self) -> Result<Response> {
        loop {
            let response = read_response(&mut self.reader)?;
            if !response.is_event() {
                tracing::debug!(
                    "Reply from {}: {} {}",
                    self.peer_addr,
                    response.code,
                    response.description
                );
                return Ok(response);
            }
            tracing::info!(
                "Queued event from {}: {} {}",
                self.peer_addr,
                response.code,
                response.description
            );
            self.events.push_back(response);
        }
    }

    /// Send a request and wait for its reply
    pub fn exchange(&mut self, request: &Request) -> Result<Response> {
        self.send(request)?;
        self.receive()
    }

    /// Events queued so far, oldest first
    pub fn events(&self) -> &VecDeque<Response> {
        &self.events
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Borrow the underlying writer
    pub fn writer(&self) -> &W {
        &self.writer
    }
}
