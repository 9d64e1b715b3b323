//! Local-disk media storage for ad attachments.

use std::path::{Component, Path};

use infer::MatcherType;
use uuid::Uuid;

use crate::{
    dto::upload::UploadResponse,
    entity::sea_orm_active_enums::MediaType,
    error::{AppError, AppResult},
};

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: u64 = 50 * 1024 * 1024;
pub const PUBLIC_PREFIX: &str = "/uploads";

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

const VIDEO_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/ogg", "ogv"),
    ("video/avi", "avi"),
    ("video/mov", "mov"),
];

/// What an accepted upload is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedMedia {
    pub media_type: MediaType,
    pub extension: &'static str,
}

/// Checks the declared MIME type against the allow-list and its size cap.
pub fn validate_media(content_type: &str, size: u64) -> AppResult<AcceptedMedia> {
    let content_type = content_type.trim().to_ascii_lowercase();
    let lookup = |table: &[(&str, &'static str)]| {
        table
            .iter()
            .find(|(mime, _)| *mime == content_type)
            .map(|(_, ext)| *ext)
    };

    let (media_type, extension, limit) = if let Some(ext) = lookup(IMAGE_TYPES) {
        (MediaType::Image, ext, MAX_IMAGE_BYTES)
    } else if let Some(ext) = lookup(VIDEO_TYPES) {
        (MediaType::Video, ext, MAX_VIDEO_BYTES)
    } else {
        return Err(AppError::bad_request(format!(
            "File type {content_type} is not allowed"
        )));
    };

    if size == 0 {
        return Err(AppError::bad_request("File is empty"));
    }
    if size > limit {
        return Err(AppError::bad_request(format!(
            "File is too large, maximum is {} MB",
            limit / (1024 * 1024)
        )));
    }

    Ok(AcceptedMedia {
        media_type,
        extension,
    })
}

/// Rejects content whose magic bytes say it is a different kind of media than
/// declared. Unrecognized content passes.
pub fn check_signature(media_type: MediaType, data: &[u8]) -> AppResult<()> {
    let Some(kind) = infer::get(data) else {
        return Ok(());
    };
    let consistent = match media_type {
        MediaType::Image => kind.matcher_type() == MatcherType::Image,
        // ogg containers sniff as audio
        MediaType::Video => matches!(
            kind.matcher_type(),
            MatcherType::Video | MatcherType::Audio
        ),
    };
    if consistent {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "File content ({}) does not match its declared type",
            kind.mime_type()
        )))
    }
}

/// Validates and writes the file as `<uuid>.<ext>` under `dir`.
pub async fn store_upload(dir: &Path, content_type: &str, data: &[u8]) -> AppResult<UploadResponse> {
    let accepted = validate_media(content_type, data.len() as u64)?;
    check_signature(accepted.media_type, data)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("create upload dir: {e}")))?;

    let filename = format!("{}.{}", Uuid::new_v4(), accepted.extension);
    tokio::fs::write(dir.join(&filename), data)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("write upload: {e}")))?;

    tracing::info!(%filename, size = data.len(), "stored upload");

    Ok(UploadResponse {
        url: format!("{PUBLIC_PREFIX}/{filename}"),
        filename,
        size: data.len() as u64,
        content_type: content_type.trim().to_ascii_lowercase(),
        media_type: accepted.media_type,
    })
}

/// A stored file name must be a single normal path component.
pub fn is_safe_filename(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Removes a stored file. Returns whether a file was actually deleted.
pub async fn delete_upload(dir: &Path, filename: &str) -> AppResult<bool> {
    if !is_safe_filename(filename) {
        return Err(AppError::bad_request("Invalid filename"));
    }

    match tokio::fs::remove_file(dir.join(filename)).await {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(%filename, "upload to delete was not found");
            Ok(false)
        }
        Err(err) => Err(AppError::Internal(anyhow::anyhow!("delete upload: {err}"))),
    }
}
