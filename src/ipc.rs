//! Wire protocol shared by every frontend talking to the paperdeck daemon.
//!
//! Frames are a u32 little-endian length prefix followed by a JSON body,
//! exchanged over a Unix socket. The daemon answers requests and pushes
//! complete catalog snapshots on the same stream.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::catalog::WallpaperEntry;
use crate::{Error, Result};

/// Socket file name for daemon IPC.
pub const SOCKET_NAME: &str = "paperdeck.sock";

/// Upper bound on a single frame. Catalog snapshots carry previews inline,
/// so frames can be large, but anything past this is a corrupt stream.
pub const MAX_FRAME_LEN: u32 = 64 * 1024 * 1024;

/// Resolves the daemon socket path.
pub fn socket_path() -> PathBuf {
    // Use XDG_RUNTIME_DIR if available, otherwise fall back to home dir or /tmp
    std::env::var_os("XDG_RUNTIME_DIR").map_or_else(
        || {
            dirs::home_dir().map_or_else(
                || PathBuf::from("/tmp").join(SOCKET_NAME),
                |home| home.join(".local").join("run").join(SOCKET_NAME),
            )
        },
        |runtime_dir| PathBuf::from(runtime_dir).join(SOCKET_NAME),
    )
}

/// Client-to-daemon requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// The view finished wiring its subscriptions; the daemon may start
    /// pushing catalog snapshots.
    Loaded,
    /// Ask for the ordered list of available screen identifiers.
    GetScreens,
    /// Forward the current search text verbatim; the daemon owns filtering.
    ApplyFilter { search: String },
    /// Set wallpaper `id` on `screen`.
    SetWallpaper { id: u64, screen: String },
    /// Ask the daemon to shut down.
    StopDaemon,
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Loaded => "loaded",
            Request::GetScreens => "get_screens",
            Request::ApplyFilter { .. } => "apply_filter",
            Request::SetWallpaper { .. } => "set_wp",
            Request::StopDaemon => "stop_daemon",
        }
    }
}

/// Daemon-to-client frames: direct replies and unsolicited pushes share the
/// stream and arrive strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Push {
    Ack,
    Screens(Vec<String>),
    /// A complete catalog snapshot, never a delta. Receivers discard all
    /// prior entries.
    Wallpapers(Vec<WallpaperEntry>),
    Error(DaemonError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DaemonError {
    #[error("the specified screen was not found")]
    ScreenNotFound,
    #[error("the specified wallpaper was not found")]
    WallpaperNotFound,
    #[error("the wallpaper type is unsupported")]
    UnsupportedWallpaperType,
    #[error("the daemon hit an internal error")]
    Internal,
}

impl DaemonError {
    pub fn kind(&self) -> &'static str {
        match self {
            DaemonError::ScreenNotFound => "screen_not_found",
            DaemonError::WallpaperNotFound => "wallpaper_not_found",
            DaemonError::UnsupportedWallpaperType => "unsupported_wallpaper_type",
            DaemonError::Internal => "internal_error",
        }
    }
}

/// Writes one length-prefixed JSON frame.
pub async fn write_frame<T, W>(writer: &mut W, message: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    W: AsyncWrite + Unpin,
{
    let body = serde_json::to_vec(message).map_err(|e| Error::Protocol(e.to_string()))?;
    let len = u32::try_from(body.len())
        .ok()
        .filter(|len| *len <= MAX_FRAME_LEN)
        .ok_or_else(|| Error::Protocol(format!("frame of {} bytes exceeds limit", body.len())))?;

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one length-prefixed JSON frame.
pub async fn read_frame<T, R>(reader: &mut R) -> Result<T>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(Error::Protocol(format!(
            "frame of {len} bytes exceeds limit"
        )));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    serde_json::from_slice(&body).map_err(|e| Error::Protocol(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_names_match_command_surface() {
        assert_eq!(Request::Loaded.name(), "loaded");
        assert_eq!(Request::GetScreens.name(), "get_screens");
        assert_eq!(
            Request::ApplyFilter {
                search: "nebula".to_string()
            }
            .name(),
            "apply_filter"
        );
        assert_eq!(
            Request::SetWallpaper {
                id: 7,
                screen: "DP-1".to_string()
            }
            .name(),
            "set_wp"
        );
        assert_eq!(Request::StopDaemon.name(), "stop_daemon");
    }

    #[test]
    fn test_socket_path_resolution() {
        // SAFETY: this test is the only one touching XDG_RUNTIME_DIR and it
        // restores the variable before returning.
        unsafe {
            std::env::set_var("XDG_RUNTIME_DIR", "/tmp/test-runtime");
        }
        assert_eq!(
            socket_path(),
            PathBuf::from("/tmp/test-runtime/paperdeck.sock")
        );
        unsafe {
            std::env::remove_var("XDG_RUNTIME_DIR");
        }
        // Fallback paths still end in the socket name.
        assert!(socket_path().to_string_lossy().ends_with(SOCKET_NAME));
    }

    #[tokio::test]
    async fn test_frame_round_trip() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        let request = Request::SetWallpaper {
            id: 42,
            screen: "HDMI-0".to_string(),
        };
        write_frame(&mut client, &request).await.unwrap();
        let decoded: Request = read_frame(&mut server).await.unwrap();
        assert_eq!(decoded, request);

        let push = Push::Screens(vec!["eDP-1".to_string(), "DP-2".to_string()]);
        write_frame(&mut server, &push).await.unwrap();
        let decoded: Push = read_frame(&mut client).await.unwrap();
        assert_eq!(decoded, push);
    }

    #[tokio::test]
    async fn test_read_frame_rejects_oversized_length() {
        let (mut client, mut server) = tokio::io::duplex(64);
        let len = MAX_FRAME_LEN + 1;
        tokio::io::AsyncWriteExt::write_all(&mut client, &len.to_le_bytes())
            .await
            .unwrap();

        let result: Result<Push> = read_frame(&mut server).await;
        assert!(matches!(result, Err(Error::Protocol(_))));
    }

    #[tokio::test]
    async fn test_read_frame_errors_on_truncated_body() {
        let (mut client, mut server) = tokio::io::duplex(64);
        tokio::io::AsyncWriteExt::write_all(&mut client, &8u32.to_le_bytes())
            .await
            .unwrap();
        tokio::io::AsyncWriteExt::write_all(&mut client, b"abc")
            .await
            .unwrap();
        drop(client);

        let result: Result<Push> = read_frame(&mut server).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_read_frame_rejects_malformed_json() {
        let (mut client, mut server) = tokio::io::duplex(64);
        tokio::io::AsyncWriteExt::write_all(&mut client, &4u32.to_le_bytes())
            .await
            .unwrap();
        tokio::io::AsyncWriteExt::write_all(&mut client, b"????")
            .await
            .unwrap();

        let result: Result<Push> = read_frame(&mut server).await;
        assert!(matches!(result, Err(Error::Protocol(_))));
    }
}
