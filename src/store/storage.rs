use crate::store::client::{BackendClient, ClientError};
use image::ImageFormat;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

/// Image uploads are capped at 5 MiB, videos at 50 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Video,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Upload failed: {0}")]
    Backend(#[from] ClientError),
}

/// Checks size and sniffs the content type from magic bytes, before any
/// network traffic. Returns the content type to upload with.
///
/// Accepted: jpeg/png/webp images, mp4/webm videos. The claimed filename
/// extension is ignored; only the bytes decide.
pub fn validate_asset(kind: AssetKind, bytes: &[u8]) -> Result<&'static str, StorageError> {
    let limit = match kind {
        AssetKind::Image => MAX_IMAGE_BYTES,
        AssetKind::Video => MAX_VIDEO_BYTES,
    };
    if bytes.len() > limit {
        return Err(StorageError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    match kind {
        AssetKind::Image => match image::guess_format(bytes) {
            Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
            Ok(ImageFormat::Png) => Ok("image/png"),
            Ok(ImageFormat::WebP) => Ok("image/webp"),
            Ok(other) => Err(StorageError::UnsupportedType(format!("{:?}", other))),
            Err(_) => Err(StorageError::UnsupportedType(
                "unrecognized image data".to_string(),
            )),
        },
        AssetKind::Video => sniff_video(bytes),
    }
}

fn sniff_video(bytes: &[u8]) -> Result<&'static str, StorageError> {
    // ISO BMFF puts "ftyp" at offset 4; Matroska/WebM opens with the EBML magic.
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return Ok("video/mp4");
    }
    if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Ok("video/webm");
    }
    Err(StorageError::UnsupportedType(
        "unrecognized video data".to_string(),
    ))
}

/// Object path keyed by content hash: re-uploading the same bytes lands on
/// the same object instead of piling up copies.
pub fn object_path(filename: &str, bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let prefix: String = digest
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("{}-{}", prefix, sanitize_filename(filename))
}

fn sanitize_filename(filename: &str) -> String {
    let mut sanitized = String::with_capacity(filename.len());
    let mut last_dash = false;
    for c in filename.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '.' {
            sanitized.push(c);
            last_dash = false;
        } else if !last_dash && !sanitized.is_empty() {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let sanitized = sanitized.trim_end_matches('-').to_string();
    if sanitized.is_empty() {
        "asset".to_string()
    } else {
        sanitized
    }
}

/// Validates and uploads an asset, returning its public URL.
pub async fn upload_asset(
    client: &BackendClient,
    bucket: &str,
    filename: &str,
    bytes: Vec<u8>,
    kind: AssetKind,
) -> Result<String, StorageError> {
    let content_type = validate_asset(kind, &bytes)?;
    let path = object_path(filename, &bytes);

    info!("Uploading {} ({} bytes) to bucket {}", path, bytes.len(), bucket);
    client.upload(bucket, &path, content_type, bytes).await?;

    Ok(client.public_object_url(bucket, &path))
}
