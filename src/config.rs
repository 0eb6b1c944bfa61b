use tracing::warn;

pub const DEFAULT_PORT: u16 = 42069;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Reads the listen port from the `PORT` environment variable.
    pub fn load() -> Self {
        Self::from_port_var(std::env::var("PORT").ok())
    }

    /// Falls back to [`DEFAULT_PORT`] when the value is missing or not a
    /// valid port number.
    pub fn from_port_var(value: Option<String>) -> Self {
        let port = match value {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        Self { port }
    }
}
