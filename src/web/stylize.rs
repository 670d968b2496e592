use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use base64::Engine;
use base64::engine::general_purpose;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::AppState;
use crate::error::StudioError;
use crate::options::{OutputSize, StyleStrength, parse_diorama};
use crate::prompt::build_prompt;
use crate::validation::{sniff_mime, validate_upload};

pub(crate) const MISSING_IMAGE_MESSAGE: &str = "Missing image file";

/// Successful generation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylizeResponse {
    /// Generated image, base64 encoded.
    pub image_base64: String,
    /// Options the image was generated with.
    pub meta: StylizeMeta,
}

/// Options echoed back with a result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylizeMeta {
    /// Edge length, eg `"1024"`.
    pub size: String,
    /// Strength as submitted, `medium` when left blank.
    pub style_strength: String,
}

struct UploadedImage {
    bytes: Bytes,
    content_type: Option<String>,
}

impl UploadedImage {
    /// Declared type, or what the bytes look like when the client didn't say.
    fn mime(&self) -> &str {
        match self.content_type.as_deref() {
            Some(declared) if declared != "application/octet-stream" => declared,
            _ => sniff_mime(&self.bytes).unwrap_or("application/octet-stream"),
        }
    }
}

#[derive(Default)]
struct StylizeForm {
    image: Option<UploadedImage>,
    size: Option<String>,
    style_strength: Option<String>,
    diorama: Option<String>,
}

fn multipart_error(err: MultipartError) -> StudioError {
    StudioError::BadRequest(err.body_text())
}

async fn read_form(mut multipart: Multipart) -> Result<StylizeForm, StudioError> {
    let mut form = StylizeForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "image" => {
                // plain text parts don't count as a file
                if field.file_name().is_none() {
                    debug!("Ignoring image field without a filename");
                    continue;
                }
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.image = Some(UploadedImage {
                    bytes,
                    content_type,
                });
            }
            "size" => form.size = Some(field.text().await.map_err(multipart_error)?),
            "styleStrength" => {
                form.style_strength = Some(field.text().await.map_err(multipart_error)?)
            }
            "diorama" => form.diorama = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }
    Ok(form)
}

/// handles POST /api/stylize
#[instrument(skip_all)]
pub(crate) async fn stylize_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<StylizeResponse>, StudioError> {
    let api_key = state.config.api_key().ok_or(StudioError::MissingApiKey)?;
    let multipart = multipart.map_err(|rejection| StudioError::BadRequest(rejection.body_text()))?;
    let form = read_form(multipart).await?;

    let image = form
        .image
        .ok_or_else(|| StudioError::BadRequest(MISSING_IMAGE_MESSAGE.to_string()))?;
    let size = OutputSize::from_form(form.size.as_deref())?;
    let style_strength = form
        .style_strength
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| StyleStrength::default().to_string());
    let strength = StyleStrength::from(style_strength.as_str());
    let diorama = parse_diorama(form.diorama.as_deref());

    if state.config.enforce_upload_limits
        && let Some(message) = validate_upload(image.mime(), image.bytes.len() as u64)
    {
        return Err(StudioError::BadRequest(message.to_string()));
    }

    let source_base64 = general_purpose::STANDARD.encode(&image.bytes);
    let prompt = build_prompt(strength, diorama);
    info!(
        "Stylizing {} byte upload, size={} strength={} diorama={}",
        image.bytes.len(),
        size,
        strength,
        diorama
    );

    let image_base64 = state
        .images
        .edit_image(api_key, &prompt, &source_base64, size)
        .await?;

    Ok(Json(StylizeResponse {
        image_base64,
        meta: StylizeMeta {
            size: size.to_string(),
            style_strength,
        },
    }))
}
