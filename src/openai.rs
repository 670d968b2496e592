//! Client for the OpenAI Images API.
//! Docs: https://platform.openai.com/docs/api-reference/images

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{INVALID_UPSTREAM_MESSAGE, StudioError};
use crate::options::OutputSize;

/// Request body for POST /images/edits
#[derive(Serialize, Debug)]
pub struct ImageEditRequest<'a> {
    /// Image model name
    pub model: &'a str,
    /// Instruction text
    pub prompt: &'a str,
    /// Source image, base64 encoded
    pub image: &'a str,
    /// Number of images wanted, always one
    pub n: u8,
    /// `WxH`
    pub size: String,
}

#[derive(Deserialize, Debug)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    b64_json: Option<String>,
    revised_prompt: Option<String>,
}

/// Talks to the images API. Cheap to clone, clones share a connection pool.
#[derive(Clone, Debug)]
pub struct ImagesClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
}

impl ImagesClient {
    /// New client for the API rooted at `base_url`.
    pub fn new(base_url: Url, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model: model.into(),
        }
    }

    /// Full URL of the edits endpoint.
    pub fn edits_url(&self) -> String {
        format!(
            "{}/images/edits",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Asks for a stylized version of `image_base64` and returns the first image, base64 encoded.
    ///
    /// A non-success status hands back the response text untouched.
    pub async fn edit_image(
        &self,
        api_key: &str,
        prompt: &str,
        image_base64: &str,
        size: OutputSize,
    ) -> Result<String, StudioError> {
        let req_body = ImageEditRequest {
            model: &self.model,
            prompt,
            image: image_base64,
            n: 1,
            size: size.dimensions(),
        };

        let url = self.edits_url();
        debug!("POST {} model={} size={}", url, self.model, req_body.size);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&req_body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            debug!("Images API returned {status}");
            return Err(StudioError::Upstream(text));
        }

        let parsed: ImagesResponse = serde_json::from_str(&text).map_err(|err| {
            debug!("Failed to parse images response: {err}");
            StudioError::Upstream(INVALID_UPSTREAM_MESSAGE.to_string())
        })?;

        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| StudioError::Upstream(INVALID_UPSTREAM_MESSAGE.to_string()))?;

        if let Some(revised_prompt) = first.revised_prompt {
            debug!("Revised prompt from OpenAI: {revised_prompt}");
        }

        first
            .b64_json
            .filter(|b64| !b64.is_empty())
            .ok_or_else(|| StudioError::Upstream(INVALID_UPSTREAM_MESSAGE.to_string()))
    }
}
