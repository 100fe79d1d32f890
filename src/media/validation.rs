use image::ImageReader;
use regex::Regex;
use std::io::Cursor;
use std::sync::LazyLock;

pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Path segment used while the owning record has no primary key yet.
pub const UNKNOWN_OWNER: &str = "unknown";

static INVALID_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-\w.]").expect("static regex"));

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid file type '{found}', must be one of {allowed:?}")]
    InvalidImageType {
        found: String,
        allowed: Vec<&'static str>,
    },
    #[error("error validating image file: {0}")]
    ImageValidation(String),
}

/// Checks that `bytes` hold a readable jpeg, png, gif or webp image.
///
/// The format comes from the content, never from a file extension. Anything
/// that cannot be identified or whose header does not parse is an
/// [`ImageError::ImageValidation`].
pub fn validate_image(bytes: &[u8]) -> Result<(), ImageError> {
    let format =
        image::guess_format(bytes).map_err(|e| ImageError::ImageValidation(e.to_string()))?;

    let mime = format.to_mime_type();
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(ImageError::InvalidImageType {
            found: mime.to_string(),
            allowed: ALLOWED_MIME_TYPES.to_vec(),
        });
    }

    ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| ImageError::ImageValidation(e.to_string()))?;

    Ok(())
}

/// Storage path of an uploaded entity image, relative to the media root.
pub fn upload_path(owner_id: Option<i32>, filename: &str) -> String {
    let owner = owner_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string());
    format!("entities/images/{}/{}", owner, filename)
}

/// Variant of `filename` used when the plain name is already taken:
/// `medusa.png` becomes `medusa_2.png` for `n = 2`. `n = 0` keeps the name.
pub fn numbered_filename(filename: &str, n: u32) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, n, ext),
        _ => format!("{}_{}", filename, n),
    }
}

/// Reduces an uploaded file name to a single safe path component.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim()
        .replace(' ', "_");
    let cleaned = INVALID_NAME_CHARS.replace_all(&base, "");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    pub(crate) fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format)
            .expect("encode test image");
        buf
    }

    const TINY_GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00\xff\xff\xff\x00\x00\x00!\xf9\x04\x01\x00\x00\x00\x00,\x00\x00\x00\x00\x01\x00\x01\x00\x00\x02\x02D\x01\x00;";

    const TINY_WEBP: &[u8] = &[
        0x52, 0x49, 0x46, 0x46, 0x1a, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, 0x56, 0x50, 0x38,
        0x4c, 0x0d, 0x00, 0x00, 0x00, 0x2f, 0x00, 0x00, 0x00, 0x10, 0x07, 0x10, 0x11, 0x11, 0x88,
        0x88, 0xfe, 0x07, 0x00,
    ];

    #[test]
    fn accepts_supported_formats() {
        assert_eq!(validate_image(&encoded(ImageFormat::Png)), Ok(()));
        assert_eq!(validate_image(&encoded(ImageFormat::Jpeg)), Ok(()));
        assert_eq!(validate_image(TINY_GIF), Ok(()));
        assert_eq!(validate_image(TINY_WEBP), Ok(()));
    }

    #[test]
    fn rejects_plain_text() {
        let err = validate_image(b"just some notes about Zeus").unwrap_err();
        assert!(matches!(err, ImageError::ImageValidation(_)));
    }

    #[test]
    fn rejects_recognized_but_disallowed_format() {
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0u8; 64]);
        match validate_image(&bmp) {
            Err(ImageError::InvalidImageType { found, allowed }) => {
                assert_eq!(found, "image/bmp");
                assert_eq!(allowed.len(), 4);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_truncated_png() {
        let png = encoded(ImageFormat::Png);
        let err = validate_image(&png[..12]).unwrap_err();
        assert!(matches!(err, ImageError::ImageValidation(_)));
    }

    #[test]
    fn upload_path_uses_placeholder_without_id() {
        assert_eq!(
            upload_path(None, "zeus.png"),
            "entities/images/unknown/zeus.png"
        );
        assert_eq!(upload_path(Some(42), "zeus.png"), "entities/images/42/zeus.png");
        assert_eq!(upload_path(Some(42), "a.gif"), upload_path(Some(42), "a.gif"));
    }

    #[test]
    fn numbered_filename_keeps_extension() {
        assert_eq!(numbered_filename("medusa.png", 0), "medusa.png");
        assert_eq!(numbered_filename("medusa.png", 2), "medusa_2.png");
        assert_eq!(numbered_filename("archive.tar.gz", 1), "archive.tar_1.gz");
        assert_eq!(numbered_filename("upload", 3), "upload_3");
    }

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\pics\\my zeus!.png"), "my_zeus.png");
        assert_eq!(sanitize_filename("..."), "upload");
    }
}
