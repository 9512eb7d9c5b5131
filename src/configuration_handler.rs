use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "survivor_scheduler",
    about = "Tracks weekly evening availability of a fixed roster of players"
)]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on
    #[arg(long, env = "SURVIVOR_PORT", default_value_t = 8080)]
    port: u16,

    /// Store availability history files here instead of in memory
    #[arg(long, env = "SURVIVOR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory containing the roster file
    #[arg(long, env = "SURVIVOR_CONFIG_DIR", default_value = ".")]
    config_dir: PathBuf,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
    }

    fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone()
    }

    fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }
}
