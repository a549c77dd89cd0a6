//! Command line and environment configuration for the demo server.

use clap::Parser;
use fapi_server::Envelope;

/// fapi todo reference service
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "mock-server", about = "Todo API served through fapi-server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Success envelope: "bare" or "wrapped"
    #[arg(long, env = "FAPI_ENVELOPE", default_value = "wrapped")]
    pub envelope: Envelope,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
