//! Runtime configuration for the server, read from command line flags and environment variables.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// A web app for tracking categories of spending and income.
///
/// Each option can also be set through the environment variable shown, or in a `.env` file.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The name shown in page titles and the navigation bar.
    #[arg(long, env = "APP_NAME", default_value = "Financial Tracker")]
    pub app_name: String,

    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH", default_value = "financial_tracker.db")]
    pub db_path: PathBuf,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// The port to serve the app from.
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log at the debug level and log the full request and response for each request.
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// The directory to serve static files from.
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// The file to write debug logs to.
    #[arg(long, env = "LOG_FILE", default_value = "debug.log")]
    pub log_file: PathBuf,
}

impl Config {
    /// The socket address built from [Config::host] and [Config::port].
    ///
    /// # Errors
    /// Returns an error if the host is not a valid IP address.
    pub fn socket_address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Financial Tracker".to_owned(),
            db_path: PathBuf::from("financial_tracker.db"),
            host: "127.0.0.1".to_owned(),
            port: 8000,
            debug: false,
            static_dir: PathBuf::from("static"),
            log_file: PathBuf::from("debug.log"),
        }
    }
}
