use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use paperdeck::daemon::DaemonConnection;
use paperdeck::ipc::{self, DaemonError, Push, Request};

#[derive(Parser)]
#[command(name = "paperdeck")]
#[command(
    version,
    about = "Control a running paperdeck wallpaper daemon from the command line."
)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, default_value_t = false, help = "Output in JSON format", global = true)]
    json: bool,
    #[arg(long, help = "Path to the daemon socket", global = true)]
    socket: Option<PathBuf>,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v, -vv)",
        global = true
    )]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Change the wallpaper on the given screen")]
    Set {
        #[arg(help = "The screen identifier (e.g. \"DP-1\", \"HDMI-0\")")]
        screen: String,
        #[arg(help = "The wallpaper ID to set")]
        id: u64,
    },
    #[command(about = "List all available screens", alias = "outputs")]
    Screens,
    #[command(about = "Stop the daemon", aliases = &["kill-daemon", "kill"])]
    Stop,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.json {
        let level = match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        tracing_subscriber::fmt()
            .without_time()
            .with_target(false)
            .with_env_filter(level)
            .init();
    }

    let socket = args.socket.clone().unwrap_or_else(ipc::socket_path);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut connection = match DaemonConnection::connect(&socket).await {
            Ok(connection) => connection,
            Err(err) => {
                report_daemon_unreachable(&err.to_string(), args.json);
                return;
            }
        };

        match &args.command {
            Commands::Screens => match connection.call(&Request::GetScreens).await {
                Ok(push) => report_push(&push, args.json),
                Err(err) => report_daemon_unreachable(&err.to_string(), args.json),
            },
            Commands::Set { screen, id } => {
                info!("Setting wallpaper with ID {} on screen {}", id, screen);
                let request = Request::SetWallpaper {
                    id: *id,
                    screen: screen.clone(),
                };
                match connection.call(&request).await {
                    Ok(push) => report_push(&push, args.json),
                    Err(err) => report_daemon_unreachable(&err.to_string(), args.json),
                }
            }
            Commands::Stop => match connection.send(&Request::StopDaemon).await {
                Ok(()) => {
                    if args.json {
                        println!(r#"{{"success": true}}"#);
                    } else {
                        info!("Stop request sent to the daemon successfully.");
                    }
                }
                Err(err) => report_daemon_unreachable(&err.to_string(), args.json),
            },
        }
    });

    Ok(())
}

fn report_push(push: &Push, json: bool) {
    match push {
        Push::Ack => {
            if json {
                println!(r#"{{"success": true}}"#);
            } else {
                info!("Success");
            }
        }
        Push::Screens(screens) => {
            if json {
                println!(
                    r#"{{"success": true, "screens": {}}}"#,
                    serde_json::to_string(screens).unwrap_or_else(|_| "[]".to_string())
                );
            } else {
                info!("Screens: {:?}", screens);
            }
        }
        Push::Error(err) => report_daemon_error(err, json),
        Push::Wallpapers(_) => {
            // The daemon only pushes catalogs to a frontend that announced
            // itself as loaded; seeing one here means a protocol mismatch.
            report_daemon_unreachable("unexpected catalog push", json);
        }
    }
}

fn report_daemon_error(err: &DaemonError, json: bool) {
    if json {
        println!(
            r#"{{"success": false, "error": "{}", "message": "{}"}}"#,
            err.kind(),
            err
        );
    } else {
        error!("Error: {}", err);
    }
}

fn report_daemon_unreachable(message: &str, json: bool) {
    if json {
        println!(
            r#"{{"success": false, "error": "no_daemon", "message": "{}"}}"#,
            message
        );
    } else {
        error!("Failed to talk to the daemon, is it running?");
        error!("{}", message);
    }
}
