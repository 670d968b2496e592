//! Shared constants for things
//!

/// Largest upload we accept, in bytes (inclusive).
pub const MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;

/// Request body cap, leaves room for a full-size image plus multipart framing.
pub const REQUEST_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// MIME types the upload form accepts.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Where the images API lives unless configured otherwise.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Image model used for edits unless configured otherwise.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Path of the generation endpoint.
pub const STYLIZE_PATH: &str = "/api/stylize";
