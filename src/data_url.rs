use std::fmt;

use crate::error::AppError;

/// MIME types accepted by the upload control.
pub const ACCEPTED_UPLOAD_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

pub fn accept_attribute() -> String {
    ACCEPTED_UPLOAD_TYPES.join(", ")
}

pub fn is_accepted_upload(mime: &str) -> bool {
    ACCEPTED_UPLOAD_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(mime.trim()))
}

/// A base64 data URL split into its MIME type and payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: String,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parses `data:<mime>[;params];base64,<payload>`.
    pub fn parse(url: &str) -> Result<Self, AppError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| AppError::MalformedImage("missing data: scheme".into()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| AppError::MalformedImage("missing payload separator".into()))?;
        let header = header
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::MalformedImage("payload is not base64".into()))?;
        let mime_type = header.split(';').next().unwrap_or_default().trim();
        if mime_type.is_empty() || !mime_type.contains('/') {
            return Err(AppError::MalformedImage("missing MIME type".into()));
        }
        Ok(Self::new(mime_type, data))
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}
