use std::ffi::OsStr;
use std::path::Path;

use mime::Mime;

/// A profile photo picked by the user, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: Mime,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = detect_content_type(&bytes);
        Self {
            file_name: file_name.into(),
            mime,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("photo")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime.type_() == mime::IMAGE
    }
}

/// Sniffs the content type from the leading bytes; unknown content is an octet stream.
fn detect_content_type(bytes: &[u8]) -> Mime {
    infer::get(bytes)
        .and_then(|kind| kind.mime_type().parse::<Mime>().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
