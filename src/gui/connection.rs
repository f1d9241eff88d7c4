//! Daemon I/O worker backing the picker's subscription.
//!
//! The worker owns the socket for the whole session. Commands queued by the
//! picker are written in order; every inbound frame is translated 1:1 into
//! an [`Event`] and delivered in arrival order, so the picker sees exactly
//! the stream the daemon produced. The worker never reconnects: a failed or
//! lost connection ends in a terminal [`Event::Disconnected`].

use std::path::PathBuf;

use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream, StreamExt};
use iced::stream;

use crate::catalog::WallpaperEntry;
use crate::daemon::DaemonConnection;
use crate::ipc::{DaemonError, Push, Request};

#[derive(Debug, Clone)]
pub enum Event {
    /// Connection established; carries the sender the picker dispatches
    /// commands through.
    Connected(CommandSender),
    Screens(Vec<String>),
    Catalog(Vec<WallpaperEntry>),
    DaemonError(DaemonError),
    Disconnected(String),
}

#[derive(Debug, Clone)]
pub struct CommandSender(mpsc::Sender<Request>);

impl CommandSender {
    pub(crate) fn new(sender: mpsc::Sender<Request>) -> Self {
        Self(sender)
    }

    pub fn try_send(&mut self, request: Request) -> Result<(), mpsc::TrySendError<Request>> {
        self.0.try_send(request)
    }
}

pub fn connect(socket: PathBuf) -> impl Stream<Item = Event> {
    stream::channel(100, move |mut output| async move {
        let connection = match DaemonConnection::connect(&socket).await {
            Ok(connection) => connection,
            Err(err) => {
                tracing::error!("failed to connect to daemon: {err}");
                let _ = output.send(Event::Disconnected(err.to_string())).await;
                return park().await;
            }
        };

        let (sender, mut commands) = mpsc::channel(32);
        let _ = output.send(Event::Connected(CommandSender::new(sender))).await;

        let (mut reader, mut writer) = connection.split();

        loop {
            tokio::select! {
                request = commands.select_next_some() => {
                    tracing::debug!(command = request.name(), "forwarding picker command");
                    if let Err(err) = writer.send(&request).await {
                        let _ = output.send(Event::Disconnected(err.to_string())).await;
                        break;
                    }
                }
                push = reader.recv() => match push {
                    Ok(Push::Screens(screens)) => {
                        let _ = output.send(Event::Screens(screens)).await;
                    }
                    Ok(Push::Wallpapers(entries)) => {
                        let _ = output.send(Event::Catalog(entries)).await;
                    }
                    Ok(Push::Error(err)) => {
                        let _ = output.send(Event::DaemonError(err)).await;
                    }
                    Ok(Push::Ack) => tracing::debug!("daemon acknowledged request"),
                    Err(err) => {
                        let _ = output.send(Event::Disconnected(err.to_string())).await;
                        break;
                    }
                },
            }
        }

        park().await
    })
}

/// Keeps the subscription stream alive after a terminal event so the
/// runtime does not restart it and silently retry the connection.
async fn park() {
    iced::futures::future::pending::<()>().await
}
