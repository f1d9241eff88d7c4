//! Catalog entries pushed by the daemon.

use serde::{Deserialize, Serialize};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{Error, Result};

/// One wallpaper in a catalog snapshot. Entries are created by the daemon,
/// identified by a session-stable id, and never mutated by a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperEntry {
    pub id: u64,
    pub title: String,
    /// Inline preview as a `data:image/<fmt>;base64,` URL.
    pub preview_b64: String,
}

/// Decodes an inline preview data URL into raw image bytes.
///
/// The daemon encodes previews as jpeg, png or gif; any other media type is
/// rejected rather than handed to the image widget.
pub fn decode_preview(data_url: &str) -> Result<Vec<u8>> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Preview("missing data URL prefix".to_string()))?;

    let (media_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| Error::Preview("preview is not base64-encoded".to_string()))?;

    if !matches!(media_type, "image/jpeg" | "image/png" | "image/gif") {
        return Err(Error::Preview(format!(
            "unsupported preview media type: {media_type}"
        )));
    }

    STANDARD
        .decode(payload)
        .map_err(|e| Error::Preview(e.to_string()))
}
