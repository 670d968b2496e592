//! Upload checks, shared by the page script and (optionally) the endpoint.

use crate::constants::{ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};

/// Rejection message for an unsupported type.
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Only PNG, JPG and WebP images are supported.";

/// Rejection message for an oversized upload.
pub const TOO_LARGE_MESSAGE: &str = "Image must be 8 MB or less.";

/// Returns why an upload can't be used, or `None` if it's fine.
///
/// The size ceiling is inclusive, a file of exactly [`MAX_UPLOAD_BYTES`] passes.
pub fn validate_upload(mime: &str, size: u64) -> Option<&'static str> {
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Some(UNSUPPORTED_TYPE_MESSAGE);
    }
    if size > MAX_UPLOAD_BYTES {
        return Some(TOO_LARGE_MESSAGE);
    }
    None
}

/// Works out an allowed MIME type from the file's magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => Some("image/png"),
        image::ImageFormat::Jpeg => Some("image/jpeg"),
        image::ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";
    const WEBP_MAGIC: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";
    const GIF_MAGIC: &[u8] = b"GIF89a\x01\0\x01\0";

    #[test]
    fn allows_the_three_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(validate_upload(mime, 1024), None);
        }
    }

    #[test]
    fn rejects_other_types() {
        for mime in ["image/gif", "image/svg+xml", "application/pdf", "", "IMAGE/PNG"] {
            assert_eq!(validate_upload(mime, 10), Some(UNSUPPORTED_TYPE_MESSAGE), "{mime}");
        }
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert_eq!(validate_upload("image/png", MAX_UPLOAD_BYTES), None);
        assert_eq!(
            validate_upload("image/png", MAX_UPLOAD_BYTES + 1),
            Some(TOO_LARGE_MESSAGE)
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        assert_eq!(
            validate_upload("image/gif", MAX_UPLOAD_BYTES * 2),
            Some(UNSUPPORTED_TYPE_MESSAGE)
        );
    }

    #[test]
    fn sniffs_magic_bytes() {
        assert_eq!(sniff_mime(PNG_MAGIC), Some("image/png"));
        assert_eq!(sniff_mime(JPEG_MAGIC), Some("image/jpeg"));
        assert_eq!(sniff_mime(WEBP_MAGIC), Some("image/webp"));
        assert_eq!(sniff_mime(GIF_MAGIC), None);
        assert_eq!(sniff_mime(b"hello"), None);
    }
}
