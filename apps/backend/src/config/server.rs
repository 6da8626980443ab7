use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `BACKEND_HOST` / `BACKEND_PORT`; defaults to 0.0.0.0:4000.
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT is not a valid port: {raw:?}")))?,
            Err(_) => 4000,
        };
        Ok(Self { host, port })
    }
}
