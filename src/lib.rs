pub mod catalog;
pub mod daemon;
pub mod ipc;

#[cfg(any(feature = "cli", feature = "gui"))]
pub mod config;
#[cfg(any(feature = "cli", feature = "gui"))]
pub mod utils;
#[cfg(feature = "gui")]
pub mod gui;

pub use catalog::WallpaperEntry;
#[cfg(any(feature = "cli", feature = "gui"))]
pub use config::PickerConfig;
pub use daemon::DaemonConnection;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Daemon connection error: {0}")]
    Daemon(String),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Preview decode error: {0}")]
    Preview(String),
    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "gui")]
    #[error("GUI error: {0}")]
    Gui(String),
}

pub type Result<T> = std::result::Result<T, Error>;
