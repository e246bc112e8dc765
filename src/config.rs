//! Configuration for the SNP client
//!
//! Connection target and protocol settings, passed explicitly at
//! registration time.

/// Host used when none is configured
pub const DEFAULT_HOST: &str = "localhost";

/// Well-known SNP port
pub const DEFAULT_PORT: u16 = 9887;

/// Protocol version written into every request
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.0";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Application
    // -------------------------------------------------------------------------
    /// Name the application registers under. Required, validated on register.
    pub app_name: String,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Daemon host name or address
    pub host: String,

    /// Daemon TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Value of the `version=` field in outgoing requests
    pub protocol_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` form suitable for `TcpStream::connect`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the application name
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.config.app_name = name.into();
        self
    }

    /// Set the daemon host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the daemon port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the protocol version sent with each request
    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.config.protocol_version = version.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
