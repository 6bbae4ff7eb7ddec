use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::ImageFile;

/// Uploads must be strictly smaller than this.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a name")]
    MissingName,
    #[error("Please select an image file less than 5MB")]
    InvalidImage,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::MissingName)
    } else {
        Ok(())
    }
}

pub fn validate_image(image: &ImageFile) -> Result<(), ValidationError> {
    if image.is_image() && image.len() < MAX_IMAGE_BYTES {
        Ok(())
    } else {
        Err(ValidationError::InvalidImage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image::tests::png_of_len;

    #[test]
    fn accepts_simple_addresses() {
        for email in ["a@b.co", "jane.doe@example.com", "x+tag@sub.domain.org"] {
            assert_eq!(validate_email(email), Ok(()), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "plainaddress",
            "missing-at.example.com",
            "no-dot@example",
            "@example.com",
            "user@.",
            "two words@example.com",
            "a@b@c.com",
        ] {
            assert_eq!(validate_email(email), Err(ValidationError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(validate_name("   "), Err(ValidationError::MissingName));
        assert_eq!(validate_name("Ada"), Ok(()));
    }

    #[test]
    fn image_must_be_under_five_megabytes() {
        let just_under = ImageFile::new("a.png", png_of_len((MAX_IMAGE_BYTES - 1) as usize));
        assert_eq!(validate_image(&just_under), Ok(()));

        let at_limit = ImageFile::new("b.png", png_of_len(MAX_IMAGE_BYTES as usize));
        assert_eq!(validate_image(&at_limit), Err(ValidationError::InvalidImage));
    }

    #[test]
    fn image_must_have_image_mime_type() {
        let pdf = ImageFile {
            file_name: "cv.pdf".to_string(),
            mime: mime::APPLICATION_PDF,
            bytes: vec![0; 128],
        };
        assert_eq!(validate_image(&pdf), Err(ValidationError::InvalidImage));
    }
}
