//! snarl-notify
//!
//! Sends a single notification through an SNP daemon.

use clap::Parser;
use snarl::{Config, SnarlClient};
use tracing_subscriber::{fmt, EnvFilter};

/// Send a notification to a Snarl daemon
#[derive(Parser, Debug)]
#[command(name = "snarl-notify")]
#[command(about = "Send a notification over the Snarl Network Protocol")]
#[command(version)]
struct Args {
    /// Daemon host
    #[arg(long, default_value = snarl::config::DEFAULT_HOST)]
    host: String,

    /// Daemon port
    #[arg(short, long, default_value_t = snarl::config::DEFAULT_PORT)]
    port: u16,

    /// Application name to register as
    #[arg(short, long)]
    app: String,

    /// Notification class
    #[arg(short, long, default_value = "General")]
    class: String,

    /// Class title shown in the daemon's settings (defaults to the class)
    #[arg(long)]
    class_title: Option<String>,

    /// Notification title
    #[arg(short, long, default_value = "Notification")]
    title: String,

    /// Seconds before auto-dismiss; 0 keeps it until dismissed
    #[arg(long, default_value_t = 0)]
    timeout: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Notification text
    text: String,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        "warn,snarl=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::builder()
        .app_name(&args.app)
        .host(&args.host)
        .port(args.port)
        .build();

    tracing::debug!("snarl-notify v{} -> {}", snarl::VERSION, config.addr());

    let result = SnarlClient::scoped(&config, |client| {
        client.add_class(&args.class, args.class_title.as_deref())?;
        client.notify(&args.class, &args.title, &args.text, Some(args.timeout))
    });

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
