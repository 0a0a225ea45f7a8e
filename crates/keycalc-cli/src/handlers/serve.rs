//! `serve`: run the arithmetic service

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{CliError, CliResult};

/// Format a server URL from its bind address
#[must_use]
pub fn format_server_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}

/// Runs the service until interrupted
pub fn run_serve(config: &ServerConfig) -> CliResult<()> {
    super::runtime()?.block_on(async {
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|e| {
                CliError::server(format!("cannot bind {}:{}: {e}", config.host, config.port))
            })?;
        let port = listener.local_addr().map_or(config.port, |addr| addr.port());
        println!(
            "Arithmetic service on {}",
            format_server_url(&config.host, port)
        );
        keycalc::server::serve(listener, config.cors)
            .await
            .map_err(|e| CliError::server(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_server_url() {
        assert_eq!(format_server_url("127.0.0.1", 5000), "http://127.0.0.1:5000");
    }
}
