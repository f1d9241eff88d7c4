//! Client side of the daemon socket.
//!
//! Each frontend opens one connection: the CLI sends a single request and
//! reads the reply, the picker splits the stream and keeps both halves busy
//! for the whole session. No reconnection is attempted here; resilience is
//! the daemon's problem.

use std::io::ErrorKind;
use std::path::Path;

use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};

use crate::ipc::{self, Push, Request};
use crate::{Error, Result};

#[derive(Debug)]
pub struct DaemonConnection {
    stream: UnixStream,
}

impl DaemonConnection {
    /// Connects to the daemon socket at `path`.
    ///
    /// A missing or refusing socket maps to [`Error::Daemon`] so callers can
    /// tell "daemon not running" apart from transport failures.
    pub async fn connect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Daemon(format!(
                "daemon socket not found at {}, is the daemon running?",
                path.display()
            )));
        }

        let stream = UnixStream::connect(path).await.map_err(|err| {
            if err.kind() == ErrorKind::ConnectionRefused || err.kind() == ErrorKind::NotFound {
                Error::Daemon(format!(
                    "daemon is not accepting connections on {}",
                    path.display()
                ))
            } else {
                Error::Io(err)
            }
        })?;

        Ok(Self { stream })
    }

    pub async fn send(&mut self, request: &Request) -> Result<()> {
        ipc::write_frame(&mut self.stream, request).await
    }

    pub async fn recv(&mut self) -> Result<Push> {
        ipc::read_frame(&mut self.stream).await
    }

    /// Sends `request` and waits for the daemon's next frame.
    pub async fn call(&mut self, request: &Request) -> Result<Push> {
        self.send(request).await?;
        self.recv().await
    }

    /// Splits the connection for concurrent reading and writing.
    pub fn split(self) -> (DaemonReader, DaemonWriter) {
        let (read, write) = self.stream.into_split();
        (DaemonReader { half: read }, DaemonWriter { half: write })
    }
}

pub struct DaemonReader {
    half: OwnedReadHalf,
}

impl DaemonReader {
    pub async fn recv(&mut self) -> Result<Push> {
        ipc::read_frame(&mut self.half).await
    }
}

pub struct DaemonWriter {
    half: OwnedWriteHalf,
}

impl DaemonWriter {
    pub async fn send(&mut self, request: &Request) -> Result<()> {
        ipc::write_frame(&mut self.half, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::net::UnixListener;

    fn scratch_socket(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("paperdeck-test-{}-{name}.sock", std::process::id()))
    }

    #[tokio::test]
    async fn test_connect_reports_missing_daemon() {
        let result = DaemonConnection::connect(Path::new("/nonexistent/paperdeck.sock")).await;
        match result {
            Err(Error::Daemon(message)) => assert!(message.contains("is the daemon running")),
            other => panic!("expected daemon error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_round_trips_through_socket() {
        let socket = scratch_socket("call");
        let _ = std::fs::remove_file(&socket);
        let listener = UnixListener::bind(&socket).unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request: Request = ipc::read_frame(&mut stream).await.unwrap();
            assert_eq!(request, Request::GetScreens);
            ipc::write_frame(
                &mut stream,
                &Push::Screens(vec!["eDP-1".to_string(), "DP-2".to_string()]),
            )
            .await
            .unwrap();
        });

        let mut connection = DaemonConnection::connect(&socket).await.unwrap();
        let push = connection.call(&Request::GetScreens).await.unwrap();
        assert_eq!(
            push,
            Push::Screens(vec!["eDP-1".to_string(), "DP-2".to_string()])
        );

        server.await.unwrap();
        let _ = std::fs::remove_file(&socket);
    }

    #[tokio::test]
    async fn test_split_halves_share_the_stream() {
        let socket = scratch_socket("split");
        let _ = std::fs::remove_file(&socket);
        let listener = UnixListener::bind(&socket).unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            // Unsolicited push first, then echo an ack for the request.
            ipc::write_frame(&mut stream, &Push::Wallpapers(Vec::new()))
                .await
                .unwrap();
            let request: Request = ipc::read_frame(&mut stream).await.unwrap();
            assert_eq!(request, Request::Loaded);
            ipc::write_frame(&mut stream, &Push::Ack).await.unwrap();
        });

        let connection = DaemonConnection::connect(&socket).await.unwrap();
        let (mut reader, mut writer) = connection.split();

        assert_eq!(reader.recv().await.unwrap(), Push::Wallpapers(Vec::new()));
        writer.send(&Request::Loaded).await.unwrap();
        assert_eq!(reader.recv().await.unwrap(), Push::Ack);

        server.await.unwrap();
        let _ = std::fs::remove_file(&socket);
    }
}
