//! Process-level plumbing shared by the catalog binaries:
//! layered configuration, logging bootstrap, home-dir resolution and shutdown signals.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
pub use shutdown::wait_for_shutdown;
