pub mod validation;

pub use validation::{
    numbered_filename, sanitize_filename, upload_path, validate_image, ImageError, ALLOWED_MIME_TYPES,
};
