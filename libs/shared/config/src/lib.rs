use std::env;
use std::net::{AddrParseError, SocketAddr};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("CLINIC_HOST")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_HOST not set, using 0.0.0.0");
                    "0.0.0.0".to_string()
                }),
            port: env::var("CLINIC_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("CLINIC_PORT not set or not a number, using 3000");
                    3000
                }),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
