//! Multipart parsing for the submission form.
//!
//! Text parts carry the four form fields; the optional `projectImage` part
//! carries the picture. Images are sniffed from their bytes (the declared
//! content type is ignored) and stored inline as a base64 data URL.

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use showcase_core::submission::FormFields;

use crate::error::{AppError, AppResult};

/// Largest accepted text part.
pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

pub const FIELD_PROJECT_NAME: &str = "projectName";
pub const FIELD_CREATOR_NAME: &str = "creatorName";
pub const FIELD_PROJECT_LINK: &str = "projectLink";
pub const FIELD_PROJECT_DESCRIPTION: &str = "projectDescription";
pub const FIELD_PROJECT_IMAGE: &str = "projectImage";

/// A parsed submission: text fields plus an optional image data URL.
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpload {
    pub fields: FormFields,
    pub image: Option<String>,
}

/// Read the whole multipart body. Unknown parts are ignored.
pub async fn read_submission(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> AppResult<SubmissionUpload> {
    let mut upload = SubmissionUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_PROJECT_NAME => upload.fields.project_name = read_text(field, &name).await?,
            FIELD_CREATOR_NAME => upload.fields.creator_name = read_text(field, &name).await?,
            FIELD_PROJECT_LINK => upload.fields.project_link = read_text(field, &name).await?,
            FIELD_PROJECT_DESCRIPTION => {
                upload.fields.project_description = read_text(field, &name).await?
            }
            FIELD_PROJECT_IMAGE => {
                let bytes = read_limited(field, &name, max_image_bytes).await?;
                upload.image = image_data_url(&bytes)?;
            }
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(upload)
}

/// Encode image bytes as a data URL. An empty part means "no image".
pub fn image_data_url(bytes: &[u8]) -> AppResult<Option<String>> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let format = image::guess_format(bytes)
        .map_err(|_| AppError::BadRequest("Project image is not a recognized image".into()))?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => {}
        other => {
            return Err(AppError::BadRequest(format!(
                "Unsupported image format {other:?}. Use PNG, JPEG or WebP"
            )))
        }
    }

    Ok(Some(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    )))
}

async fn read_text(field: Field<'_>, name: &str) -> AppResult<String> {
    let bytes = read_limited(field, name, MAX_TEXT_FIELD_BYTES).await?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest(format!("Field '{name}' is not valid UTF-8")))
}

/// Stream a part into memory, failing once it exceeds `limit` bytes.
async fn read_limited(mut field: Field<'_>, name: &str, limit: usize) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?
    {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::BadRequest(format!(
                "Field '{name}' exceeds the {limit} byte limit"
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}
