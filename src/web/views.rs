use askama::Template;
use askama_web::WebTemplate;

use crate::constants::{ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES, STYLIZE_PATH};
use crate::options::{OutputSize, StyleStrength};

#[derive(Clone, Debug)]
pub(crate) struct SelectOption {
    pub(crate) value: String,
    pub(crate) label: String,
    pub(crate) selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) sizes: Vec<SelectOption>,
    pub(crate) strengths: Vec<SelectOption>,
    pub(crate) accept: String,
    pub(crate) max_upload_bytes: u64,
    pub(crate) max_upload_mb: u64,
    pub(crate) endpoint: &'static str,
    pub(crate) api_key_configured: bool,
}

impl IndexTemplate {
    pub(crate) fn new(api_key_configured: bool) -> Self {
        let sizes = OutputSize::ALL
            .into_iter()
            .map(|size| SelectOption {
                value: size.to_string(),
                label: format!("{px}×{px}", px = size.pixels()),
                selected: size == OutputSize::default(),
            })
            .collect();
        let strengths = StyleStrength::ALL
            .into_iter()
            .map(|level| SelectOption {
                value: level.as_str().to_string(),
                label: level.label().to_string(),
                selected: level == StyleStrength::default(),
            })
            .collect();
        Self {
            sizes,
            strengths,
            accept: ALLOWED_MIME_TYPES.join(","),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            max_upload_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
            endpoint: STYLIZE_PATH,
            api_key_configured,
        }
    }
}
