use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::{PanelError, Result};

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// seeds the telemetry generator, OS entropy if not set
    pub seed: Option<u64>,
    pub airports_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config { port: DEFAULT_PORT, seed: None, airports_file: None }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` maps a variable name to its value, if set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| PanelError::Config(format!("invalid PORT {:?}", v)))?,
            None => DEFAULT_PORT,
        };
        let seed = lookup("PANEL_SEED")
            .map(|v| v.trim().parse().map_err(|_| PanelError::Config(format!("invalid PANEL_SEED {:?}", v))))
            .transpose()?;
        let airports_file = lookup("AIRPORTS_FILE").filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Ok(Config { port, seed, airports_file })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
