use clap::Parser;
use std::path::PathBuf;

use paperdeck::{PickerConfig, gui, ipc};

#[derive(Parser)]
#[command(name = "paperdeck-picker")]
#[command(
    version,
    about = "Paperdeck Picker, a GUI to browse the daemon's wallpaper catalog and assign wallpapers to screens."
)]
struct Args {
    #[arg(short, long, help = "Path to the daemon socket (overrides the config file)")]
    socket: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let config = PickerConfig::load_or_default()?;
    let socket = args
        .socket
        .or_else(|| config.socket.clone())
        .unwrap_or_else(ipc::socket_path);

    gui::run_picker(socket, config)?;
    Ok(())
}
