use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("render context unavailable: {0}")]
    RenderContext(String),
    #[error("Could not determine image type from data URL ({0}).")]
    MalformedImage(String),
    #[error("The AI did not return an image. Please try a different prompt or image.")]
    NoImageReturned,
    #[error("{0}")]
    Service(String),
    #[error("No API key configured. Open Settings and paste your Gemini API key.")]
    MissingApiKey,
    #[error("could not read file: {0}")]
    FileRead(String),
    #[error("Unsupported file type \"{0}\". Please upload a PNG, JPG or WEBP image.")]
    UnsupportedFileType(String),
    #[error("install prompt failed: {0}")]
    InstallPrompt(String),
}

/// Which user action a failure belongs to; picks the banner wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Crop,
    Generate,
    Enhance,
}

impl AppError {
    pub fn service(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            AppError::Service("Request failed".to_string())
        } else {
            AppError::Service(message)
        }
    }

    /// Text shown in the single error banner.
    pub fn banner(&self, stage: Stage) -> String {
        match (stage, self) {
            (_, AppError::MissingApiKey) => self.to_string(),
            (Stage::Crop, _) => "Could not crop the image. Please try again.".to_string(),
            (Stage::Upload, AppError::UnsupportedFileType(_)) => self.to_string(),
            (Stage::Upload, _) => "Could not read the selected file. Please try again.".to_string(),
            (Stage::Generate, _) => format!("Error: {self}"),
            (Stage::Enhance, _) => format!("Error getting ideas: {self}"),
        }
    }
}
